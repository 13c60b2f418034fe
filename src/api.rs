//! Public facade: `solve_tiling` and `generate_maze`, the only two entry
//! points a caller needs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, warn};

use crate::error::KernelError;
use crate::lattice::LatticeKind;
use crate::maze::{build_maze, Maze};
use crate::placement::{enumerate_placements, every_cell_is_coverable, Placement};
use crate::sat::{encode_and_solve, EdgeMode, SatSolver};
use crate::tile::Tile;
use crate::transform::enumerate_variants;

const MAX_REGION_SIDE: usize = 50;

/// A target rectangular region, in lattice-independent cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(width: usize, height: usize) -> Result<Self, KernelError> {
        if width < 1 || height < 1 || width > MAX_REGION_SIDE || height > MAX_REGION_SIDE {
            return Err(KernelError::InvalidRegion {
                width,
                height,
                reason: format!("region must be between 1x1 and {MAX_REGION_SIDE}x{MAX_REGION_SIDE}"),
            });
        }
        Ok(Self { width, height })
    }
}

/// A thread-unsafe cooperative cancellation flag. Checked at a handful of
/// checkpoints during encoding; never polled from a background thread by
/// the kernel itself.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Configuration for [`solve_tiling`]. Built with `with_*` methods in the
/// style of a runtime-validated constructor rather than a type-level one,
/// since region and tile legality can only be checked once both are known.
pub struct TilingConfig<'a> {
    pub lattice: LatticeKind,
    pub tiles: Vec<Tile>,
    pub region: Region,
    pub edge_mode: EdgeMode,
    pub sat_solver: &'a mut dyn SatSolver,
    pub on_stats: Option<Box<dyn FnOnce(usize, usize)>>,
    pub cancellation: Option<CancellationToken>,
}

impl<'a> TilingConfig<'a> {
    pub fn new(lattice: LatticeKind, tiles: Vec<Tile>, region: Region, sat_solver: &'a mut dyn SatSolver) -> Self {
        Self {
            lattice,
            tiles,
            region,
            edge_mode: EdgeMode::Plain,
            sat_solver,
            on_stats: None,
            cancellation: None,
        }
    }

    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn with_on_stats(mut self, callback: impl FnOnce(usize, usize) + 'static) -> Self {
        self.on_stats = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TilingStats {
    pub num_vars: usize,
    pub num_clauses: usize,
}

pub struct SolvableTiling {
    pub placements: Vec<Placement>,
    pub stats: TilingStats,
    pub tile_type_counts: Vec<usize>,
}

pub struct UnsolvableTiling {
    pub stats: TilingStats,
}

pub enum TilingOutcome {
    Solvable(SolvableTiling),
    Unsolvable(UnsolvableTiling),
}

/// Enumerates variants and placements for every input tile, encodes the
/// resulting exact-cover instance, and runs it through the caller's solver.
pub fn solve_tiling(config: TilingConfig<'_>) -> Result<TilingOutcome, KernelError> {
    if config.tiles.is_empty() {
        return Err(KernelError::InvalidTile {
            reason: "at least one tile shape is required".to_string(),
        });
    }

    let cancellation = config.cancellation.unwrap_or_default();

    let mut all_placements: Vec<Placement> = Vec::new();
    let mut next_id = 0usize;
    let num_tiles = config.tiles.len();

    for (tile_index, tile) in config.tiles.iter().enumerate() {
        let variants = enumerate_variants(config.lattice, tile)?;
        if variants.len() == 1 {
            warn!("tile {tile_index} has only one rotationally-distinct variant; check for an overly symmetric shape");
        }
        debug!(
            "tile {} enumerated {} normalized variants",
            tile_index,
            variants.len()
        );
        if cancellation.is_cancelled() {
            return Err(KernelError::Cancelled);
        }

        let (placements, new_next_id) = enumerate_placements(
            config.lattice,
            tile_index,
            &variants,
            config.region.width as i32,
            config.region.height as i32,
            next_id,
        )?;
        debug!(
            "tile {} enumerated {} placements in a {}x{} region",
            tile_index,
            placements.len(),
            config.region.width,
            config.region.height
        );
        if cancellation.is_cancelled() {
            return Err(KernelError::Cancelled);
        }

        all_placements.extend(placements);
        next_id = new_next_id;
    }

    if !every_cell_is_coverable(&all_placements, config.region.width as i32, config.region.height as i32) {
        warn!("at least one inner cell has no covering placement; instance is unsatisfiable before solving");
    }

    let user_on_stats = config.on_stats;
    let mut observed_stats = TilingStats::default();
    let on_stats_callback = |vars: usize, clauses: usize| {
        observed_stats = TilingStats {
            num_vars: vars,
            num_clauses: clauses,
        };
        if let Some(user_callback) = user_on_stats {
            user_callback(vars, clauses);
        }
    };

    let outcome = encode_and_solve(
        config.lattice,
        config.region.width as i32,
        config.region.height as i32,
        &all_placements,
        config.edge_mode,
        config.sat_solver,
        on_stats_callback,
        || cancellation.is_cancelled(),
    )?;

    match outcome {
        None => {
            debug!("tiling instance is unsatisfiable");
            Ok(TilingOutcome::Unsolvable(UnsolvableTiling { stats: observed_stats }))
        }
        Some(solution) => {
            let chosen: Vec<Placement> = all_placements
                .into_iter()
                .filter(|p| solution.placement_ids.contains(&p.placement_id))
                .collect();
            let tile_type_counts = (0..num_tiles)
                .map(|tile_index| chosen.iter().filter(|p| p.tile_index == tile_index).count())
                .collect();
            debug!("tiling solved with {} placements", chosen.len());
            Ok(TilingOutcome::Solvable(SolvableTiling {
                placements: chosen,
                stats: observed_stats,
                tile_type_counts,
            }))
        }
    }
}

/// Configuration for [`generate_maze`].
pub struct MazeConfig {
    pub lattice: LatticeKind,
    pub region: Region,
    pub seed: u64,
}

pub fn generate_maze(config: MazeConfig, placements: &[Placement]) -> Result<Maze, KernelError> {
    let _ = config.region;
    build_maze(config.lattice, placements, config.seed)
}
