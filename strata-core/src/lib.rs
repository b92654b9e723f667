//! Strata Core - rules engine for three-layer chess
//!
//! This crate provides the game logic for Strata, a chess variant played
//! on three stacked 8x8 boards:
//! - Board geometry (1-based layer/row/column coordinates, cell lattice)
//! - Piece kinds and their 3D movement tables
//! - Game session: move generation, capture, promotion, turn sequencing
//! - Selection state machine for a presentation layer
//! - Setup loading for custom starting positions
//!
//! The engine is synchronous and pure over a bounded 192-cell lattice; a
//! presentation layer drives it with "touch piece" / "touch cell" events
//! and renders the coordinates and events it gets back.

pub mod board;
pub mod game;
pub mod pieces;
pub mod selection;
pub mod setup;

// Re-exports for convenient access
pub use board::{Cell, CellColor, Coord, Lattice, Step, COLS, LAYERS, ROWS};
pub use game::{
    GameResult, GameSession, MoveError, MoveOutcome, MoveSet, Piece, Registry,
};
pub use pieces::{PieceId, PieceKind, Team};
pub use selection::{SelectionEvent, Selector};
pub use setup::{Placement, Setup};
