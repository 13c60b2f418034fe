//! Tile definitions: an immutable, connected set of lattice cells with
//! optional per-cell edge marks for the edge-matching SAT variant.

use rustc_hash::FxHashSet;

use crate::error::KernelError;
use crate::lattice::{Cell, LatticeKind};

/// A boolean mark on one of a cell's directed edges, used by the
/// edge-matching and edge-coloring SAT variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeMark {
    pub cell_index: usize,
    pub direction: usize,
    pub marked: bool,
}

/// An immutable polyform tile: a connected set of cells plus optional edge
/// marks, defined once and reused across every transform/placement derived
/// from it.
#[derive(Debug, Clone)]
pub struct Tile {
    pub cells: Vec<Cell>,
    pub edge_marks: Vec<EdgeMark>,
}

impl Tile {
    /// Builds a tile, validating that its cells are nonempty, pairwise
    /// distinct, and connected under the given lattice's adjacency.
    pub fn new(lattice: LatticeKind, cells: Vec<Cell>) -> Result<Self, KernelError> {
        Self::with_edge_marks(lattice, cells, Vec::new())
    }

    pub fn with_edge_marks(
        lattice: LatticeKind,
        cells: Vec<Cell>,
        edge_marks: Vec<EdgeMark>,
    ) -> Result<Self, KernelError> {
        if cells.is_empty() {
            return Err(KernelError::InvalidTile {
                reason: "tile has no cells".to_string(),
            });
        }

        let unique: FxHashSet<Cell> = cells.iter().copied().collect();
        if unique.len() != cells.len() {
            return Err(KernelError::InvalidTile {
                reason: "tile contains duplicate cells".to_string(),
            });
        }

        if !is_connected(lattice, &cells) {
            return Err(KernelError::InvalidTile {
                reason: "tile cells are not connected under lattice adjacency".to_string(),
            });
        }

        for mark in &edge_marks {
            if mark.cell_index >= cells.len() {
                return Err(KernelError::InvalidTile {
                    reason: format!(
                        "edge mark references cell index {} but tile has {} cells",
                        mark.cell_index,
                        cells.len()
                    ),
                });
            }
            if mark.direction >= lattice.num_directions() {
                return Err(KernelError::InvalidTile {
                    reason: format!(
                        "edge mark direction {} out of range for {} directions",
                        mark.direction,
                        lattice.num_directions()
                    ),
                });
            }
        }

        Ok(Self { cells, edge_marks })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Breadth-first reachability over lattice adjacency restricted to `cells`.
fn is_connected(lattice: LatticeKind, cells: &[Cell]) -> bool {
    let cell_set: FxHashSet<Cell> = cells.iter().copied().collect();
    let mut visited: FxHashSet<Cell> = FxHashSet::default();
    let mut queue = std::collections::VecDeque::new();

    let Some(&start) = cells.first() else {
        return false;
    };
    queue.push_back(start);
    visited.insert(start);

    while let Some(cell) = queue.pop_front() {
        for (_, neighbor) in lattice.neighbors(cell) {
            if cell_set.contains(&neighbor) && !visited.contains(&neighbor) {
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    visited.len() == cell_set.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_square_tile_is_accepted() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0), (0, 1), (1, 0)]);
        assert!(tile.is_ok());
    }

    #[test]
    fn disconnected_tile_is_rejected() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0), (5, 5)]);
        assert!(matches!(tile, Err(KernelError::InvalidTile { .. })));
    }

    #[test]
    fn empty_tile_is_rejected() {
        let tile = Tile::new(LatticeKind::Square, vec![]);
        assert!(matches!(tile, Err(KernelError::InvalidTile { .. })));
    }

    #[test]
    fn duplicate_cells_are_rejected() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0), (0, 0)]);
        assert!(matches!(tile, Err(KernelError::InvalidTile { .. })));
    }
}
