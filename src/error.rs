//! Crate-wide error type.
//!
//! Every fallible entry point in the kernel returns `Result<T, KernelError>`.
//! Variants map 1:1 onto the failure taxonomy: input errors are validated
//! eagerly, logic errors carry enough of a diagnostic to debug without
//! re-running the solve, and `Cancelled` never leaves partial state behind.

use thiserror::Error;

use crate::lattice::{Cell, LatticeKind};

/// Why a `SatSolver` failed to produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverFailureKind {
    /// The solver ran out of memory building or searching the instance.
    OutOfMemory,
    /// The solver reported an internal error unrelated to resource limits.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("invalid tile: {reason}")]
    InvalidTile { reason: String },

    #[error("invalid region {width}x{height}: {reason}")]
    InvalidRegion {
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("lattice invariant violated on {lattice:?} at cell {cell:?}: {detail}")]
    LatticeInvariant {
        lattice: LatticeKind,
        cell: Cell,
        detail: String,
    },

    #[error(
        "SAT model decoded to an inconsistent placement set: {detail} (offending cells: {cells:?})"
    )]
    ModelInconsistent { detail: String, cells: Vec<Cell> },

    #[error("SAT solver error ({kind:?}): {message}")]
    SolverError {
        kind: SolverFailureKind,
        message: String,
    },

    #[error("operation cancelled")]
    Cancelled,
}
