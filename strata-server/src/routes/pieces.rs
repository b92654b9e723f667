//! Piece catalog endpoint
//!
//! Returns all piece kind definitions for the UI.

use std::collections::HashMap;

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use strata_core::pieces::PieceKind;

/// Piece kind info for the UI
#[derive(Serialize)]
pub struct PieceKindInfo {
    pub name: &'static str,
    pub letter: char,
    pub move_type: &'static str,
    pub move_range: i8,
    pub directions: usize,
    pub is_king: bool,
}

fn describe(kind: PieceKind) -> PieceKindInfo {
    let (move_type, move_range, directions) = match (kind, kind.ray_profile()) {
        (PieceKind::Knight, Some((dirs, range))) => ("JUMP", range, dirs.len()),
        (_, Some((dirs, range))) if range > 1 => ("SLIDE", range, dirs.len()),
        (_, Some((dirs, range))) => ("STEP", range, dirs.len()),
        (_, None) => ("PAWN", 1, 3),
    };
    PieceKindInfo {
        name: kind.name(),
        letter: kind.letter(),
        move_type,
        move_range,
        directions,
        is_king: kind.is_king(),
    }
}

/// Get all piece kind definitions
pub async fn get_pieces() -> Json<HashMap<String, Value>> {
    let mut pieces = HashMap::new();
    for kind in PieceKind::ALL {
        let info = describe(kind);
        pieces.insert(
            info.name.to_string(),
            json!({
                "name": info.name,
                "letter": info.letter,
                "move_type": info.move_type,
                "move_range": info.move_range,
                "directions": info.directions,
                "is_king": info.is_king,
            }),
        );
    }
    Json(pieces)
}
