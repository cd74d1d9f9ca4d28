//! hgmres: restarted GMRES with Householder orthogonalization
//!
//! This crate implements Walker's "simpler GMRES": the Krylov basis is kept implicitly as a
//! product of Householder reflections instead of being orthogonalized with Gram-Schmidt.
//! The solver is generic over the operator, the vector storage, and the preconditioner, which
//! are supplied through the traits in [`core`] and [`preconditioner`].
//!
//! ```
//! use faer::Mat;
//! use hgmres::{gmres, GmresConfig};
//!
//! let a = Mat::from_fn(2, 2, |i, j| [[4.0, 1.0], [1.0, 3.0]][i][j]);
//! let b = vec![1.0_f64, 2.0];
//! let out = gmres::solve(&a, &b, &GmresConfig::new(1e-10, 10, 2)).unwrap();
//! assert!(out.stats.converged);
//! assert!((out.solution[0] - 1.0 / 11.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod preconditioner;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::preconditioner::*;
pub use crate::solver::*;
pub use crate::utils::*;

// Re-export SolveStats at the crate root for convenience
pub use crate::utils::convergence::SolveStats;
