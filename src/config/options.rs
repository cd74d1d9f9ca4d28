//! Command-line or API options for the GMRES solver.
//!
//! This module provides the `GmresConfig` struct, which carries the inputs of a
//! restarted GMRES run: the relative tolerance, the total iteration budget, and
//! the Krylov subspace dimension before restart. A configuration can be built
//! through the API or parsed from PETSc-style flags (`-ksp_rtol`, `-ksp_max_it`,
//! `-ksp_gmres_restart`).
//!
//! The solver never writes to a configuration; per-run outputs are returned in
//! [`SolveStats`](crate::utils::convergence::SolveStats).

use crate::error::SolverError;

/// GMRES inputs: tolerance, iteration budget and restart length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmresConfig {
    /// Relative tolerance (stop once ||r|| < tolerance * ||b||)
    pub tolerance: f64,
    /// Total number of inner iterations, including restarts
    pub max_iterations: usize,
    /// Maximum dimension of the Krylov space before a restart
    pub krylov_dim: usize,
}

impl Default for GmresConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 300,
            krylov_dim: 20,
        }
    }
}

impl GmresConfig {
    pub fn new(tolerance: f64, max_iterations: usize, krylov_dim: usize) -> Self {
        Self { tolerance, max_iterations, krylov_dim }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_krylov_dim(mut self, krylov_dim: usize) -> Self {
        self.krylov_dim = krylov_dim;
        self
    }

    /// Returns the relative tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of iterations
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the maximum dimension of the Krylov space before restart
    pub fn krylov_dim(&self) -> usize {
        self.krylov_dim
    }

    /// Returns the maximum number of restarts.
    ///
    /// The solver runs `max_restarts() + 1` cycles. When `krylov_dim` divides
    /// `max_iterations` exactly, one cycle is dropped so the cycles never ask
    /// for more than `max_iterations` inner steps in total.
    pub fn max_restarts(&self) -> usize {
        let Some(ret) = self.max_iterations.checked_div(self.krylov_dim) else {
            return 0;
        };
        if ret > 0 && ret * self.krylov_dim == self.max_iterations {
            ret - 1
        } else {
            ret
        }
    }

    /// Check the configuration before a solve.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.krylov_dim == 0 {
            return Err(SolverError::InvalidConfig("krylov_dim must be positive".into()));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(SolverError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Build a configuration from PETSc-style flags, starting from the defaults.
    ///
    /// Recognised flags are `-ksp_rtol <f64>`, `-ksp_max_it <usize>` and
    /// `-ksp_gmres_restart <usize>`. Anything else is skipped, so a whole
    /// command line can be passed through.
    ///
    /// # Example
    /// ```
    /// use hgmres::GmresConfig;
    /// let cfg = GmresConfig::from_options(["-ksp_rtol", "1e-8", "-ksp_gmres_restart", "30"]).unwrap();
    /// assert_eq!(cfg.krylov_dim(), 30);
    /// assert_eq!(cfg.max_iterations(), 300);
    /// ```
    pub fn from_options<I, S>(args: I) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_ref() {
                "-ksp_rtol" => cfg.tolerance = parse_value(flag.as_ref(), args.next())?,
                "-ksp_max_it" => cfg.max_iterations = parse_value(flag.as_ref(), args.next())?,
                "-ksp_gmres_restart" => cfg.krylov_dim = parse_value(flag.as_ref(), args.next())?,
                _ => {}
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_value<T, S>(flag: &str, value: Option<S>) -> Result<T, SolverError>
where
    T: std::str::FromStr,
    S: AsRef<str>,
{
    let value = value.ok_or_else(|| SolverError::InvalidOption(format!("{flag} expects a value")))?;
    value
        .as_ref()
        .parse()
        .map_err(|_| SolverError::InvalidOption(format!("{flag}: cannot parse '{}'", value.as_ref())))
}
