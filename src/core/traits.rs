//! Core linear-algebra traits for hgmres.
//!
//! The solver only ever talks to vectors, operators and inner products through
//! these traits. Bulk vector storage may live anywhere (host memory, an
//! accelerator buffer); scalars returned by [`InnerProduct`] are host values the
//! solver can branch on without another round-trip.

use num_traits::{AsPrimitive, Float};

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Host scalar type returned by reductions.
    type Scalar: Float;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors (dense or sparse).
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}

/// Storage-side vector operations needed by the Householder GMRES kernel.
///
/// `Elem` is the storage scalar. Element access (`get`/`set`) is only used on
/// a handful of leading entries per step; the bulk operations (`axpy`, `scale`,
/// prefix copies) are where an implementation should do its real work.
pub trait KrylovVector: Clone {
    /// Storage scalar type.
    type Elem: Float + 'static;

    /// A zero vector of length `n`.
    fn zeros(n: usize) -> Self;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn get(&self, i: usize) -> Self::Elem;
    fn set(&mut self, i: usize, value: Self::Elem);
    /// Set every entry to zero, keeping the length.
    fn fill_zero(&mut self);
    /// Change the length, zero-filling new entries.
    fn resize(&mut self, n: usize);
    /// self ← self + alpha · x
    fn axpy(&mut self, alpha: Self::Elem, x: &Self);
    /// self ← alpha · self
    fn scale(&mut self, alpha: Self::Elem);

    /// Copy entries `0..len` of `src` into `self`, leaving the rest untouched.
    fn copy_prefix_from(&mut self, src: &Self, len: usize) {
        for i in 0..len {
            self.set(i, src.get(i));
        }
    }

    /// Read entries `0..out.len()` into a host-side buffer.
    fn read_prefix(&self, out: &mut [Self::Elem]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.get(i);
        }
    }
}

/// Host-side control scalar for vectors whose storage scalar is `E`.
///
/// Widening from storage (`From<E>`) and narrowing back (`AsPrimitive<E>`) are
/// both infallible, e.g. `f64` over `f32` storage or `f64` over `f64`.
pub trait HostScalar<E>: Float + From<E> + AsPrimitive<E>
where
    E: Copy + 'static,
{
}

impl<E, H> HostScalar<E> for H
where
    E: Copy + 'static,
    H: Float + From<E> + AsPrimitive<E>,
{
}
