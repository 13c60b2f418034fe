//! Placement enumerator: translates each normalized variant of a tile shape
//! across a target region and keeps only fully-contained placements.

use crate::error::KernelError;
use crate::lattice::{Cell, LatticeKind};
use crate::tile::EdgeMark;
use crate::transform::NormalizedVariant;

/// One placement of a tile shape: a variant translated to an absolute
/// offset, with its global cell list already materialized.
#[derive(Debug, Clone)]
pub struct Placement {
    pub placement_id: usize,
    pub tile_index: usize,
    pub transform_index: usize,
    pub offset: Cell,
    pub cells: Vec<Cell>,
    pub edge_marks: Vec<EdgeMark>,
}

impl Placement {
    pub fn covers(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// Enumerates every placement of `variants` (all belonging to tile shape
/// `tile_index`) that lies entirely inside the `width x height` inner
/// region, assigning dense `placement_id`s in deterministic
/// `(transform_index, offset_row, offset_col)` order starting at
/// `id_start`. Returns the placements and the next free id.
pub fn enumerate_placements(
    lattice: LatticeKind,
    tile_index: usize,
    variants: &[NormalizedVariant],
    width: i32,
    height: i32,
    id_start: usize,
) -> Result<(Vec<Placement>, usize), KernelError> {
    if width < 1 || height < 1 {
        return Err(KernelError::InvalidRegion {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
            reason: "region dimensions must be at least 1x1".to_string(),
        });
    }

    let mut placements = Vec::new();
    let mut next_id = id_start;

    for variant in variants {
        let variant_height = variant.height();
        let variant_width = variant.width();

        let row_lo = -(variant_height - 1);
        let row_hi = height - 1;
        let col_lo = -(variant_width - 1);
        let col_hi = width - 1;

        for offset_row in row_lo..=row_hi {
            for offset_col in col_lo..=col_hi {
                if lattice == LatticeKind::Triangle && (offset_row + offset_col).rem_euclid(2) != 0 {
                    continue;
                }

                let cells: Vec<Cell> = variant
                    .cells
                    .iter()
                    .map(|&(r, c)| (r + offset_row, c + offset_col))
                    .collect();

                if !cells
                    .iter()
                    .all(|&(r, c)| r >= 0 && r < height && c >= 0 && c < width)
                {
                    continue;
                }

                placements.push(Placement {
                    placement_id: next_id,
                    tile_index,
                    transform_index: variant.transform_index,
                    offset: (offset_row, offset_col),
                    cells,
                    edge_marks: variant.edge_marks.clone(),
                });
                next_id += 1;
            }
        }
    }

    Ok((placements, next_id))
}

/// True if every cell of the `width x height` inner region is covered by at
/// least one placement. Used to fail fast before handing an unsatisfiable
/// instance to the SAT encoder.
pub fn every_cell_is_coverable(placements: &[Placement], width: i32, height: i32) -> bool {
    for row in 0..height {
        for col in 0..width {
            if !placements.iter().any(|p| p.covers((row, col))) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;
    use crate::transform::enumerate_variants;

    #[test]
    fn single_cell_tile_tiles_every_cell_of_a_grid() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0)]).unwrap();
        let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
        let (placements, next_id) =
            enumerate_placements(LatticeKind::Square, 0, &variants, 3, 3, 0).unwrap();
        assert_eq!(placements.len(), 9);
        assert_eq!(next_id, 9);
        assert!(every_cell_is_coverable(&placements, 3, 3));
    }

    #[test]
    fn domino_has_no_overhanging_placements() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0), (0, 1)]).unwrap();
        let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
        let (placements, _) = enumerate_placements(LatticeKind::Square, 0, &variants, 2, 2, 0).unwrap();
        for placement in &placements {
            for &(r, c) in &placement.cells {
                assert!((0..2).contains(&r));
                assert!((0..2).contains(&c));
            }
        }
    }

    #[test]
    fn placement_ids_are_dense_and_start_at_offset() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0)]).unwrap();
        let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
        let (placements, next_id) =
            enumerate_placements(LatticeKind::Square, 0, &variants, 2, 2, 10).unwrap();
        let mut ids: Vec<usize> = placements.iter().map(|p| p.placement_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 11, 12, 13]);
        assert_eq!(next_id, 14);
    }

    #[test]
    fn triangle_placements_respect_parity_offset() {
        let tile = Tile::new(LatticeKind::Triangle, vec![(0, 0)]).unwrap();
        let variants = enumerate_variants(LatticeKind::Triangle, &tile).unwrap();
        let (placements, _) =
            enumerate_placements(LatticeKind::Triangle, 0, &variants, 4, 4, 0).unwrap();
        for placement in &placements {
            assert_eq!(
                (placement.offset.0 + placement.offset.1).rem_euclid(2),
                0
            );
        }
    }

    #[test]
    fn zero_width_region_is_rejected() {
        let tile = Tile::new(LatticeKind::Square, vec![(0, 0)]).unwrap();
        let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
        let result = enumerate_placements(LatticeKind::Square, 0, &variants, 0, 3, 0);
        assert!(matches!(result, Err(KernelError::InvalidRegion { .. })));
    }
}
