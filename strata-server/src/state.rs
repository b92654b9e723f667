//! Server state management

use std::sync::RwLock;

use strata_core::GameSession;

/// Server-wide shared state.
///
/// The server hosts one game at a time; starting a new game replaces the
/// previous session.
pub struct ServerState {
    pub game: RwLock<Option<GameSession>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            game: RwLock::new(None),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
