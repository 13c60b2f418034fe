//! Lattice geometry: three independent coordinate systems (square, hex,
//! triangle) behind a single enum-dispatched capability set rather than a
//! trait-object hierarchy.

pub mod hex;
pub mod square;
pub mod triangle;

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Integer lattice coordinate, `(row, col)` for every lattice kind.
pub type Cell = (i32, i32);

/// A lattice-specific vertex coordinate. Square and hex vertices live on an
/// integer grid derived from cell coordinates; triangle vertices are the
/// half-edge `(X, Y)` points used for its rotation/reflection math.
pub type Vertex = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    Square,
    Hex,
    Triangle,
}

impl LatticeKind {
    pub const fn num_directions(self) -> usize {
        match self {
            LatticeKind::Square => square::NUM_DIRECTIONS,
            LatticeKind::Hex => hex::NUM_DIRECTIONS,
            LatticeKind::Triangle => triangle::NUM_DIRECTIONS,
        }
    }

    pub const fn num_transforms(self) -> usize {
        match self {
            LatticeKind::Square => square::NUM_TRANSFORMS,
            LatticeKind::Hex => hex::NUM_TRANSFORMS,
            LatticeKind::Triangle => triangle::NUM_TRANSFORMS,
        }
    }

    pub const fn num_rotations(self) -> usize {
        match self {
            LatticeKind::Square => square::NUM_ROTATIONS,
            LatticeKind::Hex => hex::NUM_ROTATIONS,
            LatticeKind::Triangle => triangle::NUM_ROTATIONS,
        }
    }

    pub fn neighbors(self, cell: Cell) -> Vec<(usize, Cell)> {
        match self {
            LatticeKind::Square => square::neighbors(cell),
            LatticeKind::Hex => hex::neighbors(cell),
            LatticeKind::Triangle => triangle::neighbors(cell),
        }
    }

    pub fn shared_edge(self, a: Cell, b: Cell) -> Option<(usize, usize)> {
        match self {
            LatticeKind::Square => square::shared_edge(a, b),
            LatticeKind::Hex => hex::shared_edge(a, b),
            LatticeKind::Triangle => triangle::shared_edge(a, b),
        }
    }

    /// Applies a rigid motion to a cell treated as a vector relative to the
    /// origin. Square and hex transforms never fail; triangle transforms can
    /// surface a `LatticeInvariant` if the half-edge reconstruction breaks.
    pub fn apply_transform(self, transform_index: usize, cell: Cell) -> Result<Cell, KernelError> {
        match self {
            LatticeKind::Square => Ok(square::apply_transform(transform_index, cell)),
            LatticeKind::Hex => Ok(hex::apply_transform(transform_index, cell)),
            LatticeKind::Triangle => triangle::apply_transform(transform_index, cell).map_err(|detail| {
                KernelError::LatticeInvariant {
                    lattice: self,
                    cell,
                    detail,
                }
            }),
        }
    }

    pub fn edge_permutation(self, transform_index: usize) -> Result<Vec<usize>, KernelError> {
        match self {
            LatticeKind::Square => Ok(square::edge_permutation(transform_index)),
            LatticeKind::Hex => Ok(hex::edge_permutation(transform_index)),
            LatticeKind::Triangle => {
                triangle::edge_permutation(transform_index).map_err(|detail| KernelError::LatticeInvariant {
                    lattice: self,
                    cell: (0, 0),
                    detail,
                })
            }
        }
    }

    pub fn cell_to_vertices(self, cell: Cell) -> Vec<Vertex> {
        match self {
            LatticeKind::Square => square::cell_to_vertices(cell),
            LatticeKind::Hex => hex::cell_to_vertices(cell),
            LatticeKind::Triangle => triangle::cell_to_vertices(cell),
        }
    }

    pub fn vertices_to_cell(self, vertices: &[Vertex]) -> Result<Cell, KernelError> {
        let result = match self {
            LatticeKind::Square => square::vertices_to_cell(vertices).ok_or_else(|| "empty vertex list".to_string()),
            LatticeKind::Hex => hex::vertices_to_cell(vertices).ok_or_else(|| "empty vertex list".to_string()),
            LatticeKind::Triangle => triangle::vertices_to_cell(vertices),
        };
        result.map_err(|detail| KernelError::LatticeInvariant {
            lattice: self,
            cell: vertices.first().copied().unwrap_or((0, 0)),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_holds_for_every_lattice() {
        for &lattice in &[LatticeKind::Square, LatticeKind::Hex, LatticeKind::Triangle] {
            for row in -2..3 {
                for col in -2..3 {
                    let cell = (row, col);
                    let verts = lattice.cell_to_vertices(cell);
                    assert_eq!(lattice.vertices_to_cell(&verts).unwrap(), cell);
                }
            }
        }
    }

    #[test]
    fn identity_transform_is_noop_for_every_lattice() {
        for &lattice in &[LatticeKind::Square, LatticeKind::Hex, LatticeKind::Triangle] {
            let cell = (1, 2);
            assert_eq!(lattice.apply_transform(0, cell).unwrap(), cell);
        }
    }

    #[test]
    fn shared_edge_is_symmetric_for_every_lattice() {
        for &lattice in &[LatticeKind::Square, LatticeKind::Hex, LatticeKind::Triangle] {
            let origin = (0, 0);
            for &(_, neighbor) in &lattice.neighbors(origin) {
                let (from_origin, from_neighbor) = lattice.shared_edge(origin, neighbor).unwrap();
                let (back_from_neighbor, back_from_origin) =
                    lattice.shared_edge(neighbor, origin).unwrap();
                assert_eq!(from_origin, back_from_origin);
                assert_eq!(from_neighbor, back_from_neighbor);
            }
        }
    }
}
