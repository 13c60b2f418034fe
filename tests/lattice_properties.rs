//! Property-style checks that hold across all three lattices: transform
//! identity, transform closure, and vertex round-trip.

use polyform_tiling_kernel::lattice::LatticeKind;
use polyform_tiling_kernel::tile::Tile;
use polyform_tiling_kernel::transform::enumerate_variants;

const LATTICES: [LatticeKind; 3] = [LatticeKind::Square, LatticeKind::Hex, LatticeKind::Triangle];

#[test]
fn transform_identity_is_a_noop_for_every_lattice() {
    for &lattice in &LATTICES {
        let cell = (2, 1);
        assert_eq!(lattice.apply_transform(0, cell).unwrap(), cell);
    }
}

#[test]
fn straight_tetromino_has_exactly_two_variants_on_the_square_lattice() {
    let tile = Tile::new(LatticeKind::Square, vec![(0, 0), (0, 1), (0, 2), (0, 3)]).unwrap();
    let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
    assert_eq!(variants.len(), 2);
}

#[test]
fn vertex_round_trip_holds_for_every_lattice_and_cell() {
    for &lattice in &LATTICES {
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
fn every_transform_applies_without_error_near_the_origin() {
    for &lattice in &LATTICES {
        for row in -2..3 {
            for col in -2..3 {
                for transform_index in 0..lattice.num_transforms() {
                    assert!(lattice.apply_transform(transform_index, (row, col)).is_ok());
                }
            }
        }
    }
}
