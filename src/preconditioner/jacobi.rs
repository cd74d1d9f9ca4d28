// Jacobi preconditioner implementation

use crate::preconditioner::Preconditioner;
use crate::core::traits::{Indexing, KrylovVector, MatVec};
use crate::error::SolverError;
use num_traits::Float;

/// Jacobi preconditioner: M⁻¹ = D⁻¹
#[derive(Clone, Debug)]
pub struct Jacobi<T> {
    pub(crate) inv_diag: Vec<T>,
}

impl<T: Float> Jacobi<T> {
    /// new with empty state; user must call `setup`.
    pub fn new() -> Self {
        Self { inv_diag: Vec::new() }
    }

    /// Build directly from a known diagonal. Zero diagonal entries map to zero.
    pub fn from_diagonal(diag: &[T]) -> Self {
        Self { inv_diag: diag.iter().map(|&d| invert(d)).collect() }
    }
}

impl<T: Float> Default for Jacobi<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn invert<T: Float>(d: T) -> T {
    if d != T::zero() { T::one() / d } else { T::zero() }
}

impl<M, V, T> Preconditioner<M, V> for Jacobi<T>
where
    M: MatVec<V> + Indexing,
    V: KrylovVector<Elem = T>,
    T: Float + 'static,
{
    /// Probe the diagonal with unit vectors: d_i = (A e_i)_i.
    fn setup(&mut self, a: &M) -> Result<(), SolverError> {
        let n = a.nrows();
        let mut e = V::zeros(n);
        let mut col = V::zeros(n);
        let mut diag = Vec::with_capacity(n);
        for i in 0..n {
            e.fill_zero();
            e.set(i, T::one());
            a.matvec(&e, &mut col);
            diag.push(col.get(i));
        }
        self.inv_diag = diag.into_iter().map(invert).collect();
        Ok(())
    }

    fn apply(&self, v: &mut V) -> Result<(), SolverError> {
        if v.len() != self.inv_diag.len() {
            return Err(SolverError::Preconditioner(format!(
                "Jacobi set up for size {}, applied to vector of size {}",
                self.inv_diag.len(),
                v.len()
            )));
        }
        for (i, &d) in self.inv_diag.iter().enumerate() {
            v.set(i, v.get(i) * d);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn setup_probes_diagonal() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j { (i + 1) as f64 * 2.0 } else { 1.0 });
        let mut pc = Jacobi::new();
        <Jacobi<f64> as Preconditioner<Mat<f64>, Vec<f64>>>::setup(&mut pc, &a).unwrap();
        let mut v = vec![2.0, 4.0, 6.0];
        <Jacobi<f64> as Preconditioner<Mat<f64>, Vec<f64>>>::apply(&pc, &mut v).unwrap();
        assert_eq!(v, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn zero_diagonal_maps_to_zero() {
        let pc = Jacobi::from_diagonal(&[0.0, 2.0]);
        let mut v = vec![5.0, 5.0];
        <Jacobi<f64> as Preconditioner<Mat<f64>, Vec<f64>>>::apply(&pc, &mut v).unwrap();
        assert_eq!(v, vec![0.0, 2.5]);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let pc = Jacobi::from_diagonal(&[1.0, 2.0]);
        let mut v = vec![1.0; 3];
        let err = <Jacobi<f64> as Preconditioner<Mat<f64>, Vec<f64>>>::apply(&pc, &mut v);
        assert!(matches!(err, Err(SolverError::Preconditioner(_))));
    }
}
