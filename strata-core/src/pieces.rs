//! Piece kinds, teams and movement tables

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Step;

/// Unique piece identifier within a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Piece owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Row delta this team's pawns advance by
    pub fn forward(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    /// (layer, row) a pawn must reach to promote
    pub fn promotion_corner(self) -> (i8, i8) {
        match self {
            Team::White => (3, 8),
            Team::Black => (1, 1),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}

/// Chess piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// Sliding rays run until blocked or off the board; 8 steps spans any axis
pub const SLIDE_RANGE: i8 = 8;

/// The 6 axis-aligned directions (rook rays)
pub const AXIS_DIRS: [Step; 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
    (1, 0, 0),
    (-1, 0, 0),
];

/// The 4 same-layer diagonals
pub const PLANAR_DIAGONALS: [Step; 4] = [
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
];

/// The 8 spatial diagonals advancing on all three axes at once
pub const SPATIAL_DIAGONALS: [Step; 8] = [
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, -1, 1),
    (-1, -1, -1),
];

/// Bishop rays: planar plus spatial diagonals
pub const BISHOP_DIRS: [Step; 12] = [
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, -1, 1),
    (-1, -1, -1),
];

/// Queen rays: the rook and bishop tables combined
pub const QUEEN_DIRS: [Step; 18] = [
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, -1, 1),
    (-1, -1, -1),
];

/// King: every unit-step neighbor in the lattice
pub const KING_STEPS: [Step; 26] = [
    // Same layer
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
    // One layer up
    (1, 0, 0),
    (1, 1, 0),
    (1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
    // One layer down
    (-1, 0, 0),
    (-1, 1, 0),
    (-1, -1, 0),
    (-1, 0, 1),
    (-1, 0, -1),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, -1, 1),
    (-1, -1, -1),
];

/// Knight: the planar L-jumps for each of the three axis pairs, with the
/// remaining axis fixed at 0
pub const KNIGHT_JUMPS: [Step; 24] = [
    // Row/column plane
    (0, 1, 2),
    (0, 2, 1),
    (0, -1, 2),
    (0, -2, 1),
    (0, 1, -2),
    (0, 2, -1),
    (0, -1, -2),
    (0, -2, -1),
    // Layer/column plane
    (1, 0, 2),
    (2, 0, 1),
    (-1, 0, 2),
    (-2, 0, 1),
    (1, 0, -2),
    (2, 0, -1),
    (-1, 0, -2),
    (-2, 0, -1),
    // Layer/row plane
    (1, 2, 0),
    (2, 1, 0),
    (-1, 2, 0),
    (-2, 1, 0),
    (1, -2, 0),
    (2, -1, 0),
    (-1, -2, 0),
    (-2, -1, 0),
];

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    pub fn is_king(self) -> bool {
        self == PieceKind::King
    }

    /// Ray directions and maximum ray length for this kind.
    ///
    /// Kings and knights are single-step lookups over their offset table;
    /// sliders cast until blocked. Pawns have no ray profile, their
    /// directional cone is handled separately.
    pub fn ray_profile(self) -> Option<(&'static [Step], i8)> {
        match self {
            PieceKind::Rook => Some((&AXIS_DIRS, SLIDE_RANGE)),
            PieceKind::Bishop => Some((&BISHOP_DIRS, SLIDE_RANGE)),
            PieceKind::Queen => Some((&QUEEN_DIRS, SLIDE_RANGE)),
            PieceKind::King => Some((&KING_STEPS, 1)),
            PieceKind::Knight => Some((&KNIGHT_JUMPS, 1)),
            PieceKind::Pawn => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        }
    }

    /// Board letter for text rendering (knight is 'n')
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_distinct(steps: &[Step]) {
        let set: HashSet<Step> = steps.iter().copied().collect();
        assert_eq!(set.len(), steps.len(), "duplicate step in table");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(AXIS_DIRS.len(), 6);
        assert_eq!(BISHOP_DIRS.len(), 12);
        assert_eq!(QUEEN_DIRS.len(), 18);
        assert_eq!(KING_STEPS.len(), 26);
        assert_eq!(KNIGHT_JUMPS.len(), 24);
    }

    #[test]
    fn test_tables_distinct() {
        assert_distinct(&AXIS_DIRS);
        assert_distinct(&BISHOP_DIRS);
        assert_distinct(&QUEEN_DIRS);
        assert_distinct(&KING_STEPS);
        assert_distinct(&KNIGHT_JUMPS);
    }

    #[test]
    fn test_king_steps_are_unit_neighbors() {
        for &(dl, dr, dc) in &KING_STEPS {
            assert_ne!((dl, dr, dc), (0, 0, 0), "king table contains origin");
            assert!(dl.abs() <= 1 && dr.abs() <= 1 && dc.abs() <= 1);
        }
    }

    #[test]
    fn test_knight_jumps_are_planar_ls() {
        for &(dl, dr, dc) in &KNIGHT_JUMPS {
            let mut magnitudes = [dl.abs(), dr.abs(), dc.abs()];
            magnitudes.sort_unstable();
            assert_eq!(magnitudes, [0, 1, 2], "bad knight offset ({dl},{dr},{dc})");
        }
    }

    #[test]
    fn test_queen_is_rook_union_bishop() {
        let queen: HashSet<Step> = QUEEN_DIRS.iter().copied().collect();
        for step in AXIS_DIRS.iter().chain(&BISHOP_DIRS) {
            assert!(queen.contains(step));
        }
        assert_eq!(queen.len(), AXIS_DIRS.len() + BISHOP_DIRS.len());
    }

    #[test]
    fn test_promotion_corners() {
        assert_eq!(Team::White.promotion_corner(), (3, 8));
        assert_eq!(Team::Black.promotion_corner(), (1, 1));
        assert_eq!(Team::White.forward(), 1);
        assert_eq!(Team::Black.forward(), -1);
    }
}
