use thiserror::Error;

// Unified error type for hgmres. Numerical events (breakdown, non-convergence)
// are reported through `SolveStats`, not here.

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("preconditioner error: {0}")]
    Preconditioner(String),
}
