//! SAT encoder: exact-cover CNF construction plus the optional edge-marking
//! variant, run against a caller-supplied solver.
//!
//! The kernel never bundles a solver; callers implement [`SatSolver`] against
//! whatever backend they like and hand it in. CNF is built with `rustsat`'s
//! `Var`/`Lit` types so the wiring between this module and a real solver
//! backend stays a straight pass-through.

use rustc_hash::FxHashMap;
use rustsat::types::{Lit, Var};

use crate::error::KernelError;
use crate::lattice::{Cell, LatticeKind};
use crate::placement::Placement;

const MAX_CELLS: i64 = 2500;

/// What the SAT solver found.
pub enum SolveOutcome {
    /// Satisfiable, with a truth assignment indexed by `Var::idx()`.
    Sat(Vec<bool>),
    Unsat,
    Unknown,
}

/// Capability a caller must provide; the encoder assumes nothing about
/// incrementality and calls `solve()` exactly once.
pub trait SatSolver {
    fn new_variable(&mut self) -> Var;
    fn add_clause(&mut self, literals: &[Lit]);
    fn solve(&mut self) -> Result<SolveOutcome, KernelError>;
    fn num_vars(&self) -> usize;
    fn num_clauses(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Coverage and non-overlap clauses only.
    Plain,
    /// Adds edge-marking clauses that force adjacent placements to agree on
    /// shared-edge marks.
    Matching,
    /// Like `Matching`, but each marked edge carries one of `palette_size`
    /// colors instead of a single boolean, via an exactly-one clause group
    /// per edge plus matching clauses between adjacent placements.
    Color { palette_size: usize },
}

#[derive(Debug, Clone)]
pub struct TilingSolution {
    pub placement_ids: Vec<usize>,
}

/// Builds the CNF for `placements` over a `width x height` inner region and
/// runs it through `solver`. `on_stats` fires once, right before `solve()`,
/// with the final variable and clause counts. `is_cancelled` is polled
/// after clause emission and before solving.
pub fn encode_and_solve(
    lattice: LatticeKind,
    width: i32,
    height: i32,
    placements: &[Placement],
    edge_mode: EdgeMode,
    solver: &mut dyn SatSolver,
    on_stats: impl FnOnce(usize, usize),
    mut is_cancelled: impl FnMut() -> bool,
) -> Result<Option<TilingSolution>, KernelError> {
    if width < 1 || height < 1 {
        return Err(KernelError::InvalidRegion {
            width: width.max(0) as usize,
            height: height.max(0) as usize,
            reason: "region dimensions must be at least 1x1".to_string(),
        });
    }
    if (width as i64) * (height as i64) > MAX_CELLS {
        return Err(KernelError::InvalidRegion {
            width: width as usize,
            height: height as usize,
            reason: format!("region area exceeds the {MAX_CELLS}-cell limit"),
        });
    }

    let placement_vars: Vec<Var> = placements.iter().map(|_| solver.new_variable()).collect();

    let mut cell_placements: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
    for (index, placement) in placements.iter().enumerate() {
        for &cell in &placement.cells {
            cell_placements.entry(cell).or_default().push(index);
        }
    }

    for row in 0..height {
        for col in 0..width {
            let covering = cell_placements.get(&(row, col)).cloned().unwrap_or_default();
            if covering.is_empty() {
                solver.add_clause(&[]);
                continue;
            }
            let lits: Vec<Lit> = covering.iter().map(|&i| placement_vars[i].pos_lit()).collect();
            solver.add_clause(&lits);
            at_most_one(solver, &lits);
        }
    }

    match edge_mode {
        EdgeMode::Plain => {}
        EdgeMode::Matching => encode_edge_matching(lattice, placements, &placement_vars, solver),
        EdgeMode::Color { palette_size } => {
            encode_edge_coloring(lattice, placements, &placement_vars, palette_size, solver)
        }
    }

    let num_vars = solver.num_vars();
    let num_clauses = solver.num_clauses();
    on_stats(num_vars, num_clauses);

    if is_cancelled() {
        return Err(KernelError::Cancelled);
    }

    match solver.solve()? {
        SolveOutcome::Unsat | SolveOutcome::Unknown => Ok(None),
        SolveOutcome::Sat(model) => {
            let chosen: Vec<usize> = placement_vars
                .iter()
                .zip(placements)
                .filter(|(var, _)| model.get(var.idx()).copied().unwrap_or(false))
                .map(|(_, placement)| placement.placement_id)
                .collect();

            validate_exact_cover(&chosen, placements, width, height)?;
            Ok(Some(TilingSolution { placement_ids: chosen }))
        }
    }
}

/// Sinz sequential counter for `n >= 5`, pairwise otherwise.
fn at_most_one(solver: &mut dyn SatSolver, lits: &[Lit]) {
    if lits.len() <= 4 {
        pairwise_at_most_one(solver, lits);
    } else {
        sinz_at_most_one(solver, lits);
    }
}

fn pairwise_at_most_one(solver: &mut dyn SatSolver, lits: &[Lit]) {
    for i in 0..lits.len() {
        for j in (i + 1)..lits.len() {
            solver.add_clause(&[!lits[i], !lits[j]]);
        }
    }
}

fn sinz_at_most_one(solver: &mut dyn SatSolver, lits: &[Lit]) {
    let n = lits.len();
    let aux: Vec<Var> = (0..n - 1).map(|_| solver.new_variable()).collect();

    solver.add_clause(&[!lits[0], aux[0].pos_lit()]);
    for i in 1..n - 1 {
        solver.add_clause(&[!lits[i], aux[i].pos_lit()]);
        solver.add_clause(&[!aux[i - 1].pos_lit(), aux[i].pos_lit()]);
        solver.add_clause(&[!lits[i], !aux[i - 1].pos_lit()]);
    }
    solver.add_clause(&[!lits[n - 1], !aux[n - 2].pos_lit()]);
}

/// Canonicalizes a directed `(cell, direction)` edge to whichever of its two
/// endpoints sorts first, so both placements sharing a lattice edge vote on
/// the same boolean variable.
fn canonical_edge_key(lattice: LatticeKind, cell: Cell, direction: usize) -> (Cell, usize) {
    let Some(&(_, neighbor)) = lattice.neighbors(cell).get(direction) else {
        return (cell, direction);
    };
    if neighbor < cell {
        if let Some((dir_from_neighbor, _)) = lattice.shared_edge(neighbor, cell) {
            return (neighbor, dir_from_neighbor);
        }
    }
    (cell, direction)
}

fn encode_edge_matching(
    lattice: LatticeKind,
    placements: &[Placement],
    placement_vars: &[Var],
    solver: &mut dyn SatSolver,
) {
    let mut edge_vars: FxHashMap<(Cell, usize), Var> = FxHashMap::default();

    for (index, placement) in placements.iter().enumerate() {
        for mark in &placement.edge_marks {
            let global_cell = placement.cells[mark.cell_index];
            let key = canonical_edge_key(lattice, global_cell, mark.direction);
            let edge_var = *edge_vars.entry(key).or_insert_with(|| solver.new_variable());
            let placement_lit = placement_vars[index].pos_lit();
            if mark.marked {
                solver.add_clause(&[!placement_lit, edge_var.pos_lit()]);
            } else {
                solver.add_clause(&[!placement_lit, !edge_var.pos_lit()]);
            }
        }
    }
}

/// Variant of [`encode_edge_matching`] where a marked edge carries one of
/// `palette_size` colors rather than a single boolean. Every marked edge
/// gets its own group of `palette_size` variables bound by an exactly-one
/// clause; two placements sharing an edge reference the same group, so
/// agreement between them falls out of that exactly-one constraint instead
/// of a separate matching clause.
fn encode_edge_coloring(
    lattice: LatticeKind,
    placements: &[Placement],
    placement_vars: &[Var],
    palette_size: usize,
    solver: &mut dyn SatSolver,
) {
    let mut edge_colors: FxHashMap<(Cell, usize), Vec<Var>> = FxHashMap::default();

    for (index, placement) in placements.iter().enumerate() {
        for mark in &placement.edge_marks {
            if !mark.marked {
                continue;
            }
            let global_cell = placement.cells[mark.cell_index];
            let key = canonical_edge_key(lattice, global_cell, mark.direction);
            let colors = edge_colors
                .entry(key)
                .or_insert_with(|| (0..palette_size).map(|_| solver.new_variable()).collect());

            let placement_lit = placement_vars[index].pos_lit();
            let mut implication = vec![!placement_lit];
            implication.extend(colors.iter().map(|v| v.pos_lit()));
            solver.add_clause(&implication);
        }
    }

    for colors in edge_colors.values() {
        let lits: Vec<Lit> = colors.iter().map(|v| v.pos_lit()).collect();
        solver.add_clause(&lits);
        at_most_one(solver, &lits);
    }
}

/// Defensive re-check that the placements the solver selected truly cover
/// the inner region exactly once. A failure here indicates an encoder bug,
/// not a solver bug, and is not retriable.
fn validate_exact_cover(
    chosen_ids: &[usize],
    placements: &[Placement],
    width: i32,
    height: i32,
) -> Result<(), KernelError> {
    let chosen: Vec<&Placement> = placements
        .iter()
        .filter(|p| chosen_ids.contains(&p.placement_id))
        .collect();

    let mut coverage: FxHashMap<Cell, usize> = FxHashMap::default();
    for placement in &chosen {
        for &cell in &placement.cells {
            *coverage.entry(cell).or_insert(0) += 1;
        }
    }

    for row in 0..height {
        for col in 0..width {
            match coverage.get(&(row, col)) {
                Some(1) => {}
                Some(n) => {
                    return Err(KernelError::ModelInconsistent {
                        detail: format!("cell ({row}, {col}) covered {n} times"),
                        cells: vec![(row, col)],
                    });
                }
                None => {
                    return Err(KernelError::ModelInconsistent {
                        detail: format!("cell ({row}, {col}) left uncovered"),
                        cells: vec![(row, col)],
                    });
                }
            }
        }
    }

    Ok(())
}
