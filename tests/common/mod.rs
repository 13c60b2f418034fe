//! Shared solver harness for integration tests: a small DPLL solver over
//! `rustsat`'s `Var`/`Lit` types, good enough for the instance sizes these
//! end-to-end scenarios generate.

use polyform_tiling_kernel::error::KernelError;
use polyform_tiling_kernel::sat::{SatSolver, SolveOutcome};
use rustsat::types::{Lit, Var};

pub struct DpllSolver {
    clauses: Vec<Vec<Lit>>,
    next_var: u32,
}

impl DpllSolver {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            next_var: 0,
        }
    }
}

impl SatSolver for DpllSolver {
    fn new_variable(&mut self) -> Var {
        let var = Var::new(self.next_var);
        self.next_var += 1;
        var
    }

    fn add_clause(&mut self, literals: &[Lit]) {
        self.clauses.push(literals.to_vec());
    }

    fn solve(&mut self) -> Result<SolveOutcome, KernelError> {
        let mut assignment = vec![None; self.next_var as usize];
        if dpll(&self.clauses, &mut assignment) {
            Ok(SolveOutcome::Sat(assignment.into_iter().map(|v| v.unwrap_or(false)).collect()))
        } else {
            Ok(SolveOutcome::Unsat)
        }
    }

    fn num_vars(&self) -> usize {
        self.next_var as usize
    }

    fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

fn clause_status(clause: &[Lit], assignment: &[Option<bool>]) -> ClauseStatus {
    let mut unassigned_count = 0;
    let mut last_unassigned = None;
    for &lit in clause {
        match assignment[lit.var().idx()] {
            Some(value) if value != lit.is_neg() => return ClauseStatus::Satisfied,
            Some(_) => {}
            None => {
                unassigned_count += 1;
                last_unassigned = Some(lit);
            }
        }
    }
    match (unassigned_count, last_unassigned) {
        (0, _) => ClauseStatus::Falsified,
        (1, Some(lit)) => ClauseStatus::Unit(lit),
        _ => ClauseStatus::Undetermined,
    }
}

enum ClauseStatus {
    Satisfied,
    Falsified,
    Unit(Lit),
    Undetermined,
}

fn propagate(clauses: &[Vec<Lit>], assignment: &mut [Option<bool>]) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses {
            match clause_status(clause, assignment) {
                ClauseStatus::Falsified => return false,
                ClauseStatus::Unit(lit) => {
                    assignment[lit.var().idx()] = Some(!lit.is_neg());
                    changed = true;
                }
                ClauseStatus::Satisfied | ClauseStatus::Undetermined => {}
            }
        }
        if !changed {
            return true;
        }
    }
}

fn dpll(clauses: &[Vec<Lit>], assignment: &mut Vec<Option<bool>>) -> bool {
    if !propagate(clauses, assignment) {
        return false;
    }

    let Some(branch_var) = assignment.iter().position(|v| v.is_none()) else {
        return true;
    };

    for candidate in [true, false] {
        let mut trial = assignment.clone();
        trial[branch_var] = Some(candidate);
        if dpll(clauses, &mut trial) {
            *assignment = trial;
            return true;
        }
    }
    false
}
