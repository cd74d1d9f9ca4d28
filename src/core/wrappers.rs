//! Wrappers for faer dense matrix types and std vectors.
//!
//! This module implements the core traits for `faer::Mat`, `faer::MatRef`, and `Vec<T>`,
//! so they can be handed straight to the GMRES solver.
//!
//! # Features
//! - Matrix-vector multiplication for `faer` dense matrices.
//! - Inner product and norm for `Vec<T>`, with optional Rayon parallelism.
//! - `KrylovVector` for `Vec<T>` with slice-level prefix copies.
//! - Indexing trait implementations for vectors and matrices.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{Indexing, InnerProduct, KrylovVector, MatVec};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().matvec(x, y)
    }
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatVec<Vec<T>> for MatRef<'a, T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = (0..self.ncols()).fold(T::zero(), |acc, j| acc + self[(i, j)] * x[j]);
        }
    }
}

/// Implements inner product and norm for vectors, with optional Rayon parallelism.
///
/// The host scalar equals the storage scalar for `Vec<T>`.
impl<T: Float + Send + Sync> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .zip(y.as_slice().par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_slice()
                .par_iter()
                .map(|xi| *xi * *xi)
                .reduce(|| T::zero(), |acc, v| acc + v)
                .sqrt()
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .map(|xi| *xi * *xi)
                .fold(T::zero(), |acc, v| acc + v)
                .sqrt()
        }
    }
}

impl<T: Float + 'static> KrylovVector for Vec<T> {
    type Elem = T;

    fn zeros(n: usize) -> Self {
        vec![T::zero(); n]
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn get(&self, i: usize) -> T {
        self[i]
    }
    fn set(&mut self, i: usize, value: T) {
        self[i] = value;
    }
    fn fill_zero(&mut self) {
        self.iter_mut().for_each(|v| *v = T::zero());
    }
    fn resize(&mut self, n: usize) {
        Vec::resize(self, n, T::zero());
    }
    fn axpy(&mut self, alpha: T, x: &Self) {
        assert_eq!(Vec::len(self), x.len(), "Vectors must have the same length");
        for (yi, xi) in self.iter_mut().zip(x) {
            *yi = *yi + alpha * *xi;
        }
    }
    fn scale(&mut self, alpha: T) {
        self.iter_mut().for_each(|v| *v = *v * alpha);
    }
    fn copy_prefix_from(&mut self, src: &Self, len: usize) {
        self[..len].copy_from_slice(&src[..len]);
    }
    fn read_prefix(&self, out: &mut [T]) {
        let len = out.len();
        out.copy_from_slice(&self[..len]);
    }
}

/// Implements the `Indexing` trait for `Vec<T>`, treating a vector as a column vector.
impl<T> Indexing for Vec<T> {
    /// Returns the number of rows (length) of the vector.
    fn nrows(&self) -> usize {
        self.len()
    }
}

/// Implements the `Indexing` trait for `faer::Mat`, returning the number of rows.
impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}
