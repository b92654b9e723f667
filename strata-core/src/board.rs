//! Board geometry and the cell lattice
//!
//! Three stacked 8x8 boards addressed by 1-based (layer, row, column)
//! coordinates. Columns map to the letters 'a'..'h'; the text form of a
//! coordinate is `e4@2` (column, row, layer).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::{PieceId, Team};

/// Number of stacked board layers
pub const LAYERS: i8 = 3;
/// Rows per layer
pub const ROWS: i8 = 8;
/// Columns per layer
pub const COLS: i8 = 8;

/// A movement step as (layer, row, column) deltas
pub type Step = (i8, i8, i8);

/// Column letter to 1-based index ('a' -> 1). Callers pre-validate.
pub fn column_index(letter: char) -> i8 {
    (letter as i8) - (b'a' as i8) + 1
}

/// 1-based index to column letter (1 -> 'a'). Callers pre-validate.
pub fn column_letter(index: i8) -> char {
    (b'a' + index as u8 - 1) as char
}

/// 1-based lattice coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub layer: i8,
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(layer: i8, row: i8, col: i8) -> Self {
        Self { layer, row, col }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        (1..=LAYERS).contains(&self.layer)
            && (1..=ROWS).contains(&self.row)
            && (1..=COLS).contains(&self.col)
    }

    /// Coordinate k steps along a direction; may be off the board
    pub fn offset(&self, step: Step, k: i8) -> Coord {
        Coord::new(
            self.layer + step.0 * k,
            self.row + step.1 * k,
            self.col + step.2 * k,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}@{}", column_letter(self.col), self.row, self.layer)
        } else {
            write!(f, "({},{},{})", self.layer, self.row, self.col)
        }
    }
}

/// Malformed coordinate text
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed coordinate {0:?}, expected e.g. \"e4@2\"")]
pub struct CoordParseError(String);

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordParseError(s.to_string());
        let (square, layer) = s.split_once('@').ok_or_else(err)?;
        let mut chars = square.chars();
        let letter = chars.next().ok_or_else(err)?;
        if !letter.is_ascii_lowercase() {
            return Err(err());
        }
        let row: i8 = chars.as_str().parse().map_err(|_| err())?;
        let layer: i8 = layer.parse().map_err(|_| err())?;
        let coord = Coord::new(layer, row, column_index(letter));
        if !coord.is_valid() {
            return Err(err());
        }
        Ok(coord)
    }
}

/// Checkerboard color, fixed at lattice construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    White,
    Black,
}

impl CellColor {
    /// Derived color: alternates along columns, rows and layers
    pub fn of(at: Coord) -> Self {
        if (at.layer + at.row + at.col) % 2 == 1 {
            CellColor::White
        } else {
            CellColor::Black
        }
    }
}

/// Occupant of a cell: owning team plus the piece's registry id
pub type Occupant = (Team, PieceId);

/// One cell of the lattice.
///
/// Occupancy is a single `Option`, so the occupied-flag and the piece
/// reference cannot drift apart. The piece's own coordinate is the source
/// of truth; this is the derived index kept in sync by the session.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    color: CellColor,
    occupant: Option<Occupant>,
}

impl Cell {
    pub fn color(&self) -> CellColor {
        self.color
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Team occupying this cell, if any
    pub fn team(&self) -> Option<Team> {
        self.occupant.map(|(team, _)| team)
    }
}

/// The 3x8x8 cell grid, created once per game and never resized
#[derive(Clone, Debug)]
pub struct Lattice {
    cells: Vec<Cell>,
}

impl Lattice {
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(LAYERS as usize * ROWS as usize * COLS as usize);
        for layer in 1..=LAYERS {
            for row in 1..=ROWS {
                for col in 1..=COLS {
                    cells.push(Cell {
                        color: CellColor::of(Coord::new(layer, row, col)),
                        occupant: None,
                    });
                }
            }
        }
        Self { cells }
    }

    fn index(at: Coord) -> usize {
        debug_assert!(at.is_valid(), "lattice access out of bounds: {at}");
        (at.layer - 1) as usize * (ROWS * COLS) as usize
            + (at.row - 1) as usize * COLS as usize
            + (at.col - 1) as usize
    }

    /// Cell lookup; callers bounds-check the coordinate first
    pub fn cell(&self, at: Coord) -> &Cell {
        &self.cells[Self::index(at)]
    }

    /// Replace a cell's occupant
    pub fn set_occupant(&mut self, at: Coord, occupant: Option<Occupant>) {
        self.cells[Self::index(at)].occupant = occupant;
    }
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_validity() {
        assert!(Coord::new(1, 1, 1).is_valid());
        assert!(Coord::new(3, 8, 8).is_valid());
        assert!(!Coord::new(0, 1, 1).is_valid());
        assert!(!Coord::new(4, 1, 1).is_valid());
        assert!(!Coord::new(1, 9, 1).is_valid());
        assert!(!Coord::new(1, 1, 0).is_valid());
    }

    #[test]
    fn test_column_conversion() {
        assert_eq!(column_index('a'), 1);
        assert_eq!(column_index('h'), 8);
        for index in 1..=COLS {
            assert_eq!(column_index(column_letter(index)), index);
        }
    }

    #[test]
    fn test_algebraic_roundtrip() {
        for text in ["a1@1", "e4@2", "h8@3"] {
            let coord: Coord = text.parse().unwrap();
            assert_eq!(coord.to_string(), text);
        }
    }

    #[test]
    fn test_algebraic_rejects_garbage() {
        assert!("".parse::<Coord>().is_err());
        assert!("e4".parse::<Coord>().is_err());
        assert!("i4@1".parse::<Coord>().is_err());
        assert!("e9@1".parse::<Coord>().is_err());
        assert!("e4@4".parse::<Coord>().is_err());
        assert!("E4@1".parse::<Coord>().is_err());
    }

    #[test]
    fn test_cell_colors_alternate() {
        // Neighbors along any single axis differ in color
        let base = Coord::new(2, 4, 4);
        for step in [(1, 0, 0), (0, 1, 0), (0, 0, 1)] {
            assert_ne!(CellColor::of(base), CellColor::of(base.offset(step, 1)));
        }
        assert_eq!(CellColor::of(Coord::new(1, 1, 1)), CellColor::White);
    }

    #[test]
    fn test_lattice_occupancy() {
        let mut lattice = Lattice::new();
        let at = Coord::new(2, 3, 4);
        assert!(!lattice.cell(at).is_occupied());

        let occupant = (crate::pieces::Team::White, crate::pieces::PieceId(7));
        lattice.set_occupant(at, Some(occupant));
        assert_eq!(lattice.cell(at).occupant(), Some(occupant));
        assert_eq!(lattice.cell(at).team(), Some(crate::pieces::Team::White));

        lattice.set_occupant(at, None);
        assert!(!lattice.cell(at).is_occupied());
    }
}
