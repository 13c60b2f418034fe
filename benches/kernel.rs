//! Benchmarks for the transform engine, placement enumerator, and maze
//! spanning tree.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polyform_tiling_kernel::lattice::LatticeKind;
use polyform_tiling_kernel::maze::build_maze;
use polyform_tiling_kernel::placement::enumerate_placements;
use polyform_tiling_kernel::tile::Tile;
use polyform_tiling_kernel::transform::enumerate_variants;

fn l_tetromino() -> Tile {
    Tile::new(LatticeKind::Square, vec![(0, 0), (1, 0), (2, 0), (2, 1)]).unwrap()
}

/// Benchmark enumerating every normalized variant of a tile.
fn bench_enumerate_variants(c: &mut Criterion) {
    let tile = l_tetromino();
    c.bench_function("enumerate_variants_l_tetromino", |b| {
        b.iter(|| enumerate_variants(LatticeKind::Square, black_box(&tile)))
    });
}

/// Benchmark enumerating placements of a tile's variants across an 8x8
/// region.
fn bench_enumerate_placements(c: &mut Criterion) {
    let tile = l_tetromino();
    let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
    c.bench_function("enumerate_placements_8x8", |b| {
        b.iter(|| enumerate_placements(LatticeKind::Square, 0, black_box(&variants), 8, 8, 0))
    });
}

/// Benchmark building a uniform spanning tree over a 1x1-tile adjacency
/// graph on an 8x8 region (64 nodes).
fn bench_maze_spanning_tree(c: &mut Criterion) {
    let tile = Tile::new(LatticeKind::Square, vec![(0, 0)]).unwrap();
    let variants = enumerate_variants(LatticeKind::Square, &tile).unwrap();
    let (placements, _) = enumerate_placements(LatticeKind::Square, 0, &variants, 8, 8, 0).unwrap();

    c.bench_function("build_maze_8x8", |b| {
        b.iter(|| build_maze(LatticeKind::Square, black_box(&placements), 42))
    });
}

criterion_group!(
    benches,
    bench_enumerate_variants,
    bench_enumerate_placements,
    bench_maze_spanning_tree
);
criterion_main!(benches);
