//! Maze builder: a uniform spanning tree over the placement-adjacency graph,
//! converted into wall openings on the underlying lattice.

use petgraph::graphmap::UnGraphMap;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::error::KernelError;
use crate::lattice::{Cell, LatticeKind};
use crate::placement::Placement;

/// A single directed lattice edge: a cell and one of its direction indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeEdge {
    pub cell: Cell,
    pub direction: usize,
}

/// One opened wall: the two placements it used to separate, and the lattice
/// edge (from the lower-id placement's side) that was carved open.
#[derive(Debug, Clone, Copy)]
pub struct OpenedWall {
    pub placement_a: usize,
    pub placement_b: usize,
    pub edge: LatticeEdge,
}

#[derive(Debug, Clone)]
pub struct Maze {
    pub opened_walls: Vec<OpenedWall>,
    pub tree_edges: Vec<(usize, usize)>,
}

impl Maze {
    /// True if the lattice edge leaving `cell` in `direction` is open,
    /// either because both sides belong to the same placement or because
    /// this exact wall was carved by the spanning tree.
    pub fn is_open(&self, lattice: LatticeKind, placements: &[Placement], cell: Cell, direction: usize) -> bool {
        let Some(&(_, neighbor)) = lattice.neighbors(cell).get(direction) else {
            return false;
        };
        let owner = |c: Cell| placements.iter().find(|p| p.covers(c)).map(|p| p.placement_id);
        match (owner(cell), owner(neighbor)) {
            (Some(a), Some(b)) if a == b => true,
            (Some(_), Some(_)) => self.opened_walls.iter().any(|w| {
                (w.edge.cell == cell && w.edge.direction == direction)
                    || (w.edge.cell == neighbor
                        && lattice
                            .shared_edge(neighbor, cell)
                            .map(|(d, _)| d == w.edge.direction)
                            .unwrap_or(false))
            }),
            _ => false,
        }
    }
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Builds the undirected graph whose nodes are placement IDs and whose
/// edges connect placements sharing at least one lattice edge. Each graph
/// edge is labeled with every shared lattice edge, represented from both
/// sides, so a caller can carve whichever side it needs.
pub fn build_adjacency_graph(
    lattice: LatticeKind,
    placements: &[Placement],
) -> UnGraphMap<usize, Vec<(LatticeEdge, LatticeEdge)>> {
    let mut cell_owner: FxHashMap<Cell, usize> = FxHashMap::default();
    for placement in placements {
        for &cell in &placement.cells {
            cell_owner.insert(cell, placement.placement_id);
        }
    }

    let mut graph: UnGraphMap<usize, Vec<(LatticeEdge, LatticeEdge)>> = UnGraphMap::new();
    for placement in placements {
        graph.add_node(placement.placement_id);
    }

    let mut shared: FxHashMap<(usize, usize), Vec<(LatticeEdge, LatticeEdge)>> = FxHashMap::default();
    for placement in placements {
        for &cell in &placement.cells {
            for (direction, neighbor) in lattice.neighbors(cell) {
                let Some(&other_id) = cell_owner.get(&neighbor) else {
                    continue;
                };
                if other_id == placement.placement_id || placement.placement_id > other_id {
                    continue;
                }
                let (_, dir_from_neighbor) = lattice
                    .shared_edge(cell, neighbor)
                    .expect("neighbors() and shared_edge() must agree");
                shared.entry((placement.placement_id, other_id)).or_default().push((
                    LatticeEdge { cell, direction },
                    LatticeEdge {
                        cell: neighbor,
                        direction: dir_from_neighbor,
                    },
                ));
            }
        }
    }

    for ((a, b), edges) in shared {
        graph.add_edge(a, b, edges);
    }
    graph
}

/// Builds a maze from a placement set using randomly-shuffled Kruskal with a
/// union-find over placement indices, deterministic given `seed`.
pub fn build_maze(lattice: LatticeKind, placements: &[Placement], seed: u64) -> Result<Maze, KernelError> {
    if placements.is_empty() {
        return Ok(Maze {
            opened_walls: Vec::new(),
            tree_edges: Vec::new(),
        });
    }

    let graph = build_adjacency_graph(lattice, placements);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut edges: Vec<(usize, usize, Vec<(LatticeEdge, LatticeEdge)>)> =
        graph.all_edges().map(|(a, b, w)| (a, b, w.clone())).collect();
    edges.shuffle(&mut rng);

    let index_of: FxHashMap<usize, usize> = placements
        .iter()
        .enumerate()
        .map(|(i, p)| (p.placement_id, i))
        .collect();
    let mut uf = UnionFind::new(placements.len());

    let mut tree_edges = Vec::new();
    let mut opened_walls = Vec::new();

    for (a, b, shared_edges) in edges {
        let ia = index_of[&a];
        let ib = index_of[&b];
        if uf.union(ia, ib) {
            tree_edges.push((a, b));
            let (edge, _) = shared_edges
                .choose(&mut rng)
                .expect("an adjacency-graph edge always lists at least one shared lattice edge");
            opened_walls.push(OpenedWall {
                placement_a: a,
                placement_b: b,
                edge: *edge,
            });
        }
    }

    if tree_edges.len() != placements.len() - 1 {
        return Err(KernelError::ModelInconsistent {
            detail: "placement adjacency graph is disconnected; no spanning tree exists".to_string(),
            cells: Vec::new(),
        });
    }

    Ok(Maze { opened_walls, tree_edges })
}

/// Renders a maze over a square-lattice grid of 1x1 placements as an ASCII
/// diagram, one `#`/space column per wall. Square-lattice only: hex and
/// triangle lattices have no natural fixed-width character grid.
pub fn render_square_ascii(placements: &[Placement], maze: &Maze, width: i32, height: i32) -> String {
    let mut output = String::new();
    output.push_str(&"_".repeat((width * 2 + 1) as usize));
    output.push('\n');

    for row in 0..height {
        output.push('|');
        for col in 0..width {
            let south_open = maze.is_open(LatticeKind::Square, placements, (row, col), 2);
            output.push(if row == height - 1 || !south_open { '_' } else { ' ' });
            let east_open = maze.is_open(LatticeKind::Square, placements, (row, col), 1);
            output.push(if col == width - 1 || !east_open { '|' } else { ' ' });
        }
        output.push('\n');
    }
    output
}
