//! Stable JSON wire format for placements and bare tile-coordinate import.

use serde::{Deserialize, Serialize};

use crate::lattice::{Cell, LatticeKind};
use crate::placement::Placement;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellJson {
    pub row: i32,
    pub col: i32,
}

impl From<Cell> for CellJson {
    fn from(cell: Cell) -> Self {
        Self { row: cell.0, col: cell.1 }
    }
}

impl From<CellJson> for Cell {
    fn from(cell: CellJson) -> Self {
        (cell.row, cell.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementJson {
    pub index: usize,
    pub id: usize,
    #[serde(rename = "transformIndex")]
    pub transform_index: usize,
    pub cells: Vec<CellJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilingJson {
    #[serde(rename = "gridWidth")]
    pub grid_width: i32,
    #[serde(rename = "gridHeight")]
    pub grid_height: i32,
    pub lattice: LatticeKind,
    pub placements: Vec<PlacementJson>,
}

/// Builds the wire-format document for a solved tiling.
pub fn to_wire_format(
    lattice: LatticeKind,
    grid_width: i32,
    grid_height: i32,
    placements: &[&Placement],
) -> TilingJson {
    let placement_entries = placements
        .iter()
        .enumerate()
        .map(|(index, placement)| PlacementJson {
            index,
            id: placement.placement_id,
            transform_index: placement.transform_index,
            cells: placement.cells.iter().copied().map(CellJson::from).collect(),
        })
        .collect();

    TilingJson {
        grid_width,
        grid_height,
        lattice,
        placements: placement_entries,
    }
}

/// Serializes a solved tiling to a JSON string.
pub fn to_json_string(document: &TilingJson) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

/// Imports a bare array of `{row, col}` pairs as a tile's cell list, and
/// derives the minimum region dimensions that would contain it: at least
/// `3 x 3`, and at least `max(col)+1` wide by `max(row)+1` tall.
pub fn import_tile_cells(cells: &[CellJson]) -> (Vec<Cell>, i32, i32) {
    let cells: Vec<Cell> = cells.iter().copied().map(Cell::from).collect();
    let max_row = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let max_col = cells.iter().map(|c| c.1).max().unwrap_or(0);
    let width = (max_col + 1).max(3);
    let height = (max_row + 1).max(3);
    (cells, width, height)
}
