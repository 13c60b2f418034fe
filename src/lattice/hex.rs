//! Hex lattice: pointy-top, odd-r offset coordinates `(row, col)`.
//!
//! Internally everything is done in axial `(q, r)` coordinates using
//! `q = col - floor(row / 2)`, `r = row`.

use super::{Cell, Vertex};

pub const NUM_DIRECTIONS: usize = 6;
pub const NUM_TRANSFORMS: usize = 12;
pub const NUM_ROTATIONS: usize = 6;

/// Canonical axial direction vectors, clockwise starting from the top
/// (pointy-top hexes have no top edge, so "top" means the first edge struck
/// sweeping clockwise from the top vertex, i.e. northeast): NE, E, SE, SW,
/// W, NW.
const AXIAL_DIRECTIONS: [(i32, i32); 6] = [
    (1, -1),
    (1, 0),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (0, -1),
];

fn floor_div2(n: i32) -> i32 {
    n.div_euclid(2)
}

/// Offset `(row, col)` to axial `(q, r)`.
pub fn to_axial(cell: Cell) -> (i32, i32) {
    let (row, col) = cell;
    (col - floor_div2(row), row)
}

/// Axial `(q, r)` to offset `(row, col)`.
pub fn from_axial(axial: (i32, i32)) -> Cell {
    let (q, r) = axial;
    (r, q + floor_div2(r))
}

fn axial_to_cube(axial: (i32, i32)) -> (i32, i32, i32) {
    let (q, r) = axial;
    (q, -q - r, r)
}

fn cube_to_axial(cube: (i32, i32, i32)) -> (i32, i32) {
    let (x, _y, z) = cube;
    (x, z)
}

/// 60 degree clockwise rotation in cube coordinates.
fn rotate_cube_cw(cube: (i32, i32, i32)) -> (i32, i32, i32) {
    let (x, y, z) = cube;
    (-z, -x, -y)
}

/// Horizontal flip in axial coordinates, used as the generating reflection.
fn flip_axial(axial: (i32, i32)) -> (i32, i32) {
    let (q, r) = axial;
    (-q - r, r)
}

pub fn neighbors(cell: Cell) -> Vec<(usize, Cell)> {
    let axial = to_axial(cell);
    AXIAL_DIRECTIONS
        .iter()
        .enumerate()
        .map(|(dir, &(dq, dr))| (dir, from_axial((axial.0 + dq, axial.1 + dr))))
        .collect()
}

pub fn shared_edge(a: Cell, b: Cell) -> Option<(usize, usize)> {
    let axial_a = to_axial(a);
    let axial_b = to_axial(b);
    let delta = (axial_b.0 - axial_a.0, axial_b.1 - axial_a.1);
    let dir_from_a = AXIAL_DIRECTIONS.iter().position(|&d| d == delta)?;
    let dir_from_b = (dir_from_a + 3) % NUM_DIRECTIONS;
    Some((dir_from_a, dir_from_b))
}

fn decompose(transform_index: usize) -> (bool, usize) {
    (transform_index >= NUM_ROTATIONS, transform_index % NUM_ROTATIONS)
}

/// Applies transform `transform_index` to a cell treated as a vector
/// relative to the origin.
pub fn apply_transform(transform_index: usize, cell: Cell) -> Cell {
    let (flip, rotations) = decompose(transform_index);
    let mut axial = to_axial(cell);
    if flip {
        axial = flip_axial(axial);
    }
    let mut cube = axial_to_cube(axial);
    for _ in 0..rotations {
        cube = rotate_cube_cw(cube);
    }
    from_axial(cube_to_axial(cube))
}

pub fn edge_permutation(transform_index: usize) -> Vec<usize> {
    let origin = from_axial((0, 0));
    AXIAL_DIRECTIONS
        .iter()
        .map(|&(dq, dr)| {
            let neighbor = from_axial((dq, dr));
            let transformed_origin = apply_transform(transform_index, origin);
            let transformed_neighbor = apply_transform(transform_index, neighbor);
            let transformed_axial_origin = to_axial(transformed_origin);
            let transformed_axial_neighbor = to_axial(transformed_neighbor);
            let delta = (
                transformed_axial_neighbor.0 - transformed_axial_origin.0,
                transformed_axial_neighbor.1 - transformed_axial_origin.1,
            );
            AXIAL_DIRECTIONS
                .iter()
                .position(|&d| d == delta)
                .expect("hex transform must map a direction vector to another direction vector")
        })
        .collect()
}

/// A hex cell's single representative vertex: its own axial coordinate.
///
/// Unlike the triangle lattice, hex cells have no natural half-edge vertex
/// decomposition; this is the simplest representation consistent with the
/// round-trip invariant (see DESIGN.md).
pub fn cell_to_vertices(cell: Cell) -> Vec<Vertex> {
    vec![to_axial(cell)]
}

pub fn vertices_to_cell(vertices: &[Vertex]) -> Option<Cell> {
    let axial = *vertices.first()?;
    Some(from_axial(axial))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_axial_round_trip() {
        for row in -3..4 {
            for col in -3..4 {
                let cell = (row, col);
                assert_eq!(from_axial(to_axial(cell)), cell);
            }
        }
    }

    #[test]
    fn identity_transform_is_noop() {
        assert_eq!(apply_transform(0, (3, -2)), (3, -2));
    }

    #[test]
    fn six_rotations_return_to_start() {
        let mut cell = (2, 5);
        for _ in 0..6 {
            cell = apply_transform(1, cell);
        }
        assert_eq!(cell, (2, 5));
    }

    #[test]
    fn edge_permutations_are_permutations() {
        for ti in 0..NUM_TRANSFORMS {
            let perm = edge_permutation(ti);
            let mut seen = [false; NUM_DIRECTIONS];
            for &d in &perm {
                assert!(!seen[d]);
                seen[d] = true;
            }
        }
    }

    #[test]
    fn vertex_round_trip() {
        let cell = (4, -1);
        let verts = cell_to_vertices(cell);
        assert_eq!(vertices_to_cell(&verts), Some(cell));
    }

    #[test]
    fn shared_edge_opposite_directions() {
        let neighbors_of_origin = neighbors((0, 0));
        let (_, neighbor_cell) = neighbors_of_origin[0];
        let (from_a, from_b) = shared_edge((0, 0), neighbor_cell).unwrap();
        assert_eq!(from_a, 0);
        assert_eq!(from_b, 3);
    }
}
