//! Triangle lattice: `(row, col)` coordinates, `parity = (row + col) mod 2`
//! determines up- (`0`) vs down-pointing (`1`).
//!
//! Internally, transforms act on the half-edge vertex lattice `(X, Y)` via
//! a `(u, v)` reparametrization, since rotation by a fundamental 60 degree
//! step does not act linearly on `(row, col)` alone.

use super::{Cell, Vertex};

pub const NUM_DIRECTIONS: usize = 3;
pub const NUM_TRANSFORMS: usize = 12;
pub const NUM_ROTATIONS: usize = 6;

pub fn is_up(cell: Cell) -> bool {
    (cell.0 + cell.1).rem_euclid(2) == 0
}

/// The three half-edge vertices of a cell, in a fixed `v0, v1, v2` order.
///
/// Direction index `d` always names the edge opposite vertex `v_d`
/// (the edge shared with the neighbor across from that vertex).
pub fn cell_to_vertices(cell: Cell) -> Vec<Vertex> {
    let (row, col) = cell;
    if is_up(cell) {
        vec![(col + 1, row), (col, row + 1), (col + 2, row + 1)]
    } else {
        vec![(col, row), (col + 2, row), (col + 1, row + 1)]
    }
}

/// Reconstructs the cell whose vertex set is `vertices`, using a
/// "1 low/2 high vs 2 low/1 high" reconstruction rule.
pub fn vertices_to_cell(vertices: &[Vertex]) -> Result<Cell, String> {
    if vertices.len() != 3 {
        return Err(format!("expected 3 vertices, got {}", vertices.len()));
    }
    let max_y = vertices.iter().map(|v| v.1).max().unwrap();
    let min_y = vertices.iter().map(|v| v.1).min().unwrap();
    if max_y - min_y != 1 {
        return Err(format!(
            "maxY - minY = {} (expected 1)",
            max_y - min_y
        ));
    }

    let low: Vec<&Vertex> = vertices.iter().filter(|v| v.1 == min_y).collect();
    let high: Vec<&Vertex> = vertices.iter().filter(|v| v.1 == max_y).collect();
    let row = min_y;

    let (col, expect_up) = match (low.len(), high.len()) {
        (1, 2) => (high.iter().map(|v| v.0).min().unwrap(), true),
        (2, 1) => (low.iter().map(|v| v.0).min().unwrap(), false),
        _ => return Err("vertices do not split into a 1-low/2-high or 2-low/1-high pattern".into()),
    };

    let cell = (row, col);
    if is_up(cell) != expect_up {
        return Err("reconstructed cell parity does not match vertex pattern".into());
    }
    Ok(cell)
}

pub fn neighbors(cell: Cell) -> Vec<(usize, Cell)> {
    let (row, col) = cell;
    if is_up(cell) {
        vec![(0, (row + 1, col)), (1, (row, col + 1)), (2, (row, col - 1))]
    } else {
        vec![(0, (row, col + 1)), (1, (row, col - 1)), (2, (row - 1, col))]
    }
}

pub fn shared_edge(a: Cell, b: Cell) -> Option<(usize, usize)> {
    let dir_from_a = neighbors(a).into_iter().find(|&(_, n)| n == b)?.0;
    let dir_from_b = neighbors(b).into_iter().find(|&(_, n)| n == a)?.0;
    Some((dir_from_a, dir_from_b))
}

fn to_uv(vertex: Vertex) -> (i32, i32) {
    let (x, y) = vertex;
    ((x - y - 1) / 2, y)
}

fn from_uv(uv: (i32, i32)) -> Vertex {
    let (u, v) = uv;
    (2 * u + v + 1, v)
}

fn rotate60_cw(uv: (i32, i32)) -> (i32, i32) {
    let (u, v) = uv;
    (u + v, -u)
}

fn flip_horizontal(uv: (i32, i32)) -> (i32, i32) {
    let (u, v) = uv;
    (-u - v, v)
}

fn decompose(transform_index: usize) -> (bool, usize) {
    (transform_index >= NUM_ROTATIONS, transform_index % NUM_ROTATIONS)
}

/// Applies transform `transform_index` to a single half-edge vertex.
pub fn apply_transform_vertex(transform_index: usize, vertex: Vertex) -> Vertex {
    let (flip, rotations) = decompose(transform_index);
    let mut uv = to_uv(vertex);
    if flip {
        uv = flip_horizontal(uv);
    }
    for _ in 0..rotations {
        uv = rotate60_cw(uv);
    }
    from_uv(uv)
}

/// Applies a transform to a cell by transforming its vertex set and
/// reconstructing the resulting cell. Fails with a diagnostic string if the
/// triangle invariant (`maxY - minY = 1`) or the up/down pattern breaks.
pub fn apply_transform(transform_index: usize, cell: Cell) -> Result<Cell, String> {
    let transformed: Vec<Vertex> = cell_to_vertices(cell)
        .into_iter()
        .map(|v| apply_transform_vertex(transform_index, v))
        .collect();
    vertices_to_cell(&transformed)
}

/// How direction indices (excluded-vertex indices) relabel under a
/// transform. Computed by transforming the reference up-triangle at the
/// origin and tracking which vertex label each original vertex becomes.
pub fn edge_permutation(transform_index: usize) -> Result<Vec<usize>, String> {
    let reference = (0, 0);
    debug_assert!(is_up(reference));
    let verts = cell_to_vertices(reference);
    let transformed: Vec<Vertex> = verts
        .iter()
        .map(|&v| apply_transform_vertex(transform_index, v))
        .collect();
    let new_cell = vertices_to_cell(&transformed)?;
    let new_verts = cell_to_vertices(new_cell);

    let mut perm = vec![0usize; 3];
    for (i, transformed_vertex) in transformed.iter().enumerate() {
        perm[i] = new_verts
            .iter()
            .position(|w| w == transformed_vertex)
            .ok_or_else(|| "transformed vertex does not match any vertex of the image cell".to_string())?;
    }
    Ok(perm)
}
