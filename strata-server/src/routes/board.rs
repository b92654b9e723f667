//! Board geometry endpoint

use axum::Json;
use serde::Serialize;
use strata_core::board::{column_letter, CellColor, Coord, COLS, LAYERS, ROWS};

#[derive(Serialize)]
pub struct CellInfo {
    pub layer: i8,
    pub row: i8,
    pub col: i8,
    pub name: String,
    pub color: CellColor,
}

#[derive(Serialize)]
pub struct BoardInfo {
    pub layers: i8,
    pub rows: i8,
    pub cols: i8,
    pub columns: Vec<char>,
    pub cells: Vec<CellInfo>,
}

/// Generate every cell of the lattice with its fixed color
fn all_cells() -> Vec<CellInfo> {
    let mut cells = Vec::with_capacity(LAYERS as usize * ROWS as usize * COLS as usize);
    for layer in 1..=LAYERS {
        for row in 1..=ROWS {
            for col in 1..=COLS {
                let at = Coord::new(layer, row, col);
                cells.push(CellInfo {
                    layer,
                    row,
                    col,
                    name: at.to_string(),
                    color: CellColor::of(at),
                });
            }
        }
    }
    cells
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        layers: LAYERS,
        rows: ROWS,
        cols: COLS,
        columns: (1..=COLS).map(column_letter).collect(),
        cells: all_cells(),
    })
}
