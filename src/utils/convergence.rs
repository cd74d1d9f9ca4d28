//! Convergence tracking & tolerance checks for iterative solvers.

use num_traits::Float;

/// Stopping criterion on the relative residual.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
}

/// Outcome of one solver invocation.
///
/// Belongs to that invocation only; nothing is accumulated across calls.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveStats<T> {
    /// Inner iterations performed, summed over all restart cycles.
    pub iterations: usize,
    /// Restart cycles started (the first cycle counts as one).
    pub restarts: usize,
    /// Final residual estimate.
    ///
    /// Relative (`||r|| / ||b||`, recomputed from the returned iterate)
    /// whenever `converged` is true. When the iteration budget runs out it is
    /// the unscaled estimate `|rho * rho_0|`, unless the last cycle's estimate
    /// claimed convergence; then it is the recomputed relative residual.
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Float> SolveStats<T> {
    /// Stats of a solve that did no work (zero right-hand side).
    pub fn trivial() -> Self {
        Self {
            iterations: 0,
            restarts: 0,
            final_residual: T::zero(),
            converged: true,
        }
    }
}

impl<T: Float> Convergence<T> {
    /// |residual / reference|
    pub fn relative(&self, residual: T, reference: T) -> T {
        (residual / reference).abs()
    }

    /// Returns `(converged, relative residual)`.
    pub fn check(&self, residual: T, reference: T) -> (bool, T) {
        let rel = self.relative(residual, reference);
        (rel < self.tol, rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_is_strict() {
        let conv = Convergence { tol: 1e-3 };
        assert_eq!(conv.check(1e-3, 1.0), (false, 1e-3));
        assert!(conv.check(-1e-4, 1.0).0);
        assert!(conv.check(1e-2, 100.0).0);
        assert!(!conv.check(1e-2, 1.0).0);
    }

    #[test]
    fn nan_residual_never_converges() {
        let conv = Convergence { tol: 1.0 };
        assert!(!conv.check(f64::NAN, 1.0).0);
    }
}
