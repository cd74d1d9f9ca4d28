//! Preconditioners for the GMRES solver.
//!
//! This module defines the Preconditioner trait, the identity preconditioner used when
//! none is supplied, and a Jacobi (diagonal) preconditioner.

use crate::error::SolverError;

/// A preconditioner M ≈ A⁻¹, applied in place.
pub trait Preconditioner<M, V> {
    /// Overwrite `v` with M⁻¹ v.
    fn apply(&self, v: &mut V) -> Result<(), SolverError>;
    /// Optionally: setup/factorize from A
    fn setup(&mut self, _a: &M) -> Result<(), SolverError> { Ok(()) }
}

/// The identity preconditioner (no preconditioning).
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<M, V> Preconditioner<M, V> for Identity {
    fn apply(&self, _v: &mut V) -> Result<(), SolverError> {
        Ok(())
    }
}

pub mod jacobi;

pub use jacobi::Jacobi;
