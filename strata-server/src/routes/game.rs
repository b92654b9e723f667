//! Game API routes
//!
//! One hosted session at a time: start replaces any running game, the
//! state and moves endpoints are read-only queries, and move submission
//! maps engine rejections to HTTP errors without touching the session.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use strata_core::{Coord, GameSession, MoveError, MoveOutcome, MoveSet, Piece, PieceId, Setup, Team};

use crate::state::ServerState;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
        }),
    )
}

fn no_game() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "no active game, POST /api/game/start first")
}

/// One piece as reported to clients
#[derive(Serialize)]
pub struct PieceView {
    pub id: u32,
    pub kind: &'static str,
    pub team: Team,
    pub at: String,
    pub layer: i8,
    pub row: i8,
    pub col: i8,
    pub has_moved: bool,
}

impl PieceView {
    fn of(piece: &Piece) -> Self {
        Self {
            id: piece.id.0,
            kind: piece.kind.name(),
            team: piece.team,
            at: piece.coord.to_string(),
            layer: piece.coord.layer,
            row: piece.coord.row,
            col: piece.coord.col,
            has_moved: piece.has_moved,
        }
    }
}

/// Full game state as reported to clients
#[derive(Serialize)]
pub struct GameView {
    pub turn: Team,
    pub winner: Option<Team>,
    pub white: Vec<PieceView>,
    pub black: Vec<PieceView>,
}

impl GameView {
    fn of(session: &GameSession) -> Self {
        let mut white: Vec<PieceView> = session.pieces(Team::White).map(PieceView::of).collect();
        let mut black: Vec<PieceView> = session.pieces(Team::Black).map(PieceView::of).collect();
        white.sort_by_key(|p| p.id);
        black.sort_by_key(|p| p.id);
        Self {
            turn: session.current_turn(),
            winner: session.result().winner(),
            white,
            black,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct StartRequest {
    /// Custom starting position; the standard setup when omitted
    pub setup: Option<Setup>,
}

/// Start a new game, replacing any running session
pub async fn start_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<StartRequest>,
) -> Result<Json<GameView>, ApiError> {
    let session = match req.setup {
        Some(setup) => {
            setup
                .validate()
                .map_err(|err| api_error(StatusCode::BAD_REQUEST, err.to_string()))?;
            setup.to_session()
        }
        None => GameSession::new(),
    };
    let view = GameView::of(&session);
    *state.game.write().unwrap() = Some(session);
    tracing::info!("new game started");
    Ok(Json(view))
}

/// Get the hosted game's state
pub async fn get_game_state(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<GameView>, ApiError> {
    let game = state.game.read().unwrap();
    let session = game.as_ref().ok_or_else(no_game)?;
    Ok(Json(GameView::of(session)))
}

#[derive(Serialize)]
pub struct MovesResponse {
    pub piece_id: u32,
    pub go: Vec<String>,
    pub attacks: Vec<String>,
}

impl MovesResponse {
    fn of(piece_id: PieceId, moves: &MoveSet) -> Self {
        Self {
            piece_id: piece_id.0,
            go: moves.go.iter().map(Coord::to_string).collect(),
            attacks: moves.attacks.iter().map(Coord::to_string).collect(),
        }
    }
}

/// Get the legal destinations for one piece
pub async fn get_moves(
    State(state): State<Arc<ServerState>>,
    Path(piece_id): Path<u32>,
) -> Result<Json<MovesResponse>, ApiError> {
    let game = state.game.read().unwrap();
    let session = game.as_ref().ok_or_else(no_game)?;
    let id = PieceId(piece_id);
    let moves = session
        .legal_moves(id)
        .map_err(|err| api_error(StatusCode::NOT_FOUND, err.to_string()))?;
    Ok(Json(MovesResponse::of(id, &moves)))
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub piece_id: u32,
    /// Destination in algebraic form, e.g. "e4@2"
    pub dest: String,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub outcome: MoveOutcome,
    pub state: GameView,
}

/// Submit a move for the piece whose turn it is
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let dest: Coord = req
        .dest
        .parse()
        .map_err(|err: strata_core::board::CoordParseError| {
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        })?;

    let mut game = state.game.write().unwrap();
    let session = game.as_mut().ok_or_else(no_game)?;
    let id = PieceId(req.piece_id);
    let outcome = session.apply_move(id, dest).map_err(|err| {
        let status = match err {
            MoveError::UnknownPiece(_) => StatusCode::NOT_FOUND,
            MoveError::WrongTurn { .. } | MoveError::IllegalDestination(_) | MoveError::GameOver => {
                StatusCode::CONFLICT
            }
        };
        api_error(status, err.to_string())
    })?;

    tracing::info!("piece {} moved to {}", req.piece_id, dest);
    if let Some(winner) = outcome.game_over {
        tracing::info!("game over, {winner} wins");
    }
    Ok(Json(MoveResponse {
        outcome,
        state: GameView::of(session),
    }))
}
