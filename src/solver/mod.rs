//! Krylov solver interfaces.

use crate::preconditioner::Preconditioner;
use crate::utils::convergence::SolveStats;

/// Common interface for iterative solvers.
pub trait LinearSolver<M, V> {
    type Error;
    type Scalar: Copy + PartialOrd;
    /// Solve A·x = b. `x` holds the initial guess on entry and the solution on exit.
    /// Returns iteration stats (including convergence info).
    fn solve(
        &mut self,
        a: &M,
        pc: Option<&dyn Preconditioner<M, V>>,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<Self::Scalar>, Self::Error>;
}

pub mod triangular;
pub mod householder;

pub mod gmres;
pub use gmres::{GmresOutput, GmresSolver};

/// Host scalar as `f64` for log output.
pub(crate) fn lossy<H: num_traits::ToPrimitive>(x: H) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
