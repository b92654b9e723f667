//! Strata Server - HTTP API for the three-layer chess engine
//!
//! This crate provides the web backend:
//! - Status, board geometry and piece catalog endpoints
//! - Game API: start a session, query state and legal moves, submit moves

mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;

pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8003 }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Piece catalog
        .route("/api/pieces", get(routes::pieces::get_pieces))
        // Board geometry
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game/start", post(routes::game::start_game))
        .route("/api/game/state", get(routes::game::get_game_state))
        .route("/api/game/moves/:piece_id", get(routes::game::get_moves))
        .route("/api/game/move", post(routes::game::make_move))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(state);

    tracing::info!("Strata Server starting on http://0.0.0.0:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
