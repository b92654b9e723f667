//! Starting positions
//!
//! The standard setup mirrors flat chess on the outer layers: white's back
//! rank and pawns on layer 1, black's on layer 3, the middle layer empty.
//! Custom setups load from JSON and are validated before use.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Coord, COLS};
use crate::game::GameSession;
use crate::pieces::{PieceKind, Team};

/// Back-rank order from column a to h
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One piece in a starting position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PieceKind,
    pub at: Coord,
}

/// A full starting position for both sides
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub white: Vec<Placement>,
    pub black: Vec<Placement>,
}

impl Setup {
    /// The standard two-army starting position
    pub fn standard() -> Self {
        let mut white = Vec::with_capacity(16);
        let mut black = Vec::with_capacity(16);
        for (index, &kind) in BACK_RANK.iter().enumerate() {
            let col = index as i8 + 1;
            white.push(Placement {
                kind,
                at: Coord::new(1, 1, col),
            });
            black.push(Placement {
                kind,
                at: Coord::new(3, 8, col),
            });
        }
        for col in 1..=COLS {
            white.push(Placement {
                kind: PieceKind::Pawn,
                at: Coord::new(1, 2, col),
            });
            black.push(Placement {
                kind: PieceKind::Pawn,
                at: Coord::new(3, 7, col),
            });
        }
        Self { white, black }
    }

    /// Load a setup from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read setup file {}", path.display()))?;
        let setup: Setup = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse setup file {}", path.display()))?;
        setup.validate()?;
        Ok(setup)
    }

    /// Reject off-board placements and doubly occupied cells
    pub fn validate(&self) -> Result<()> {
        let mut occupied = FxHashSet::default();
        for (team, placements) in [(Team::White, &self.white), (Team::Black, &self.black)] {
            for placement in placements {
                if !placement.at.is_valid() {
                    bail!(
                        "{team} {} placed off the board at {}",
                        placement.kind.name(),
                        placement.at
                    );
                }
                if !occupied.insert(placement.at) {
                    bail!("two pieces placed on {}", placement.at);
                }
            }
        }
        Ok(())
    }

    /// Build a fresh game session from this setup
    pub fn to_session(&self) -> GameSession {
        let collect = |placements: &[Placement]| -> Vec<(PieceKind, Coord)> {
            placements.iter().map(|p| (p.kind, p.at)).collect()
        };
        GameSession::from_placements(&collect(&self.white), &collect(&self.black))
    }
}
