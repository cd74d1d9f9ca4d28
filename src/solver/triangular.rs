//! Implicit upper-triangular factor of the Householder GMRES QR, and its
//! back-substitution.
//!
//! The factor is filled one Krylov step at a time: step `k` produces column `k`
//! of R (entries `0..=k`). Columns are therefore stored contiguously, i.e. the
//! table is the transpose of the usual row-major upper-triangular layout:
//! `columns[j][i]` holds `R(i, j)` with `i <= j`.

use num_traits::Float;

/// Column-stored upper-triangular matrix of host scalars.
#[derive(Clone, Debug, Default)]
pub struct UpperTriangular<H> {
    columns: Vec<Vec<H>>,
}

impl<H: Float> UpperTriangular<H> {
    /// A zeroed `dim × dim` factor.
    pub fn new(dim: usize) -> Self {
        Self { columns: vec![vec![H::zero(); dim]; dim] }
    }

    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    /// Zero every entry and resize to `dim × dim`.
    pub fn reset(&mut self, dim: usize) {
        self.columns.resize_with(dim, Vec::new);
        for col in &mut self.columns {
            col.clear();
            col.resize(dim, H::zero());
        }
    }

    /// Store `entries` as the leading part of column `j`.
    pub fn set_column(&mut self, j: usize, entries: &[H]) {
        self.columns[j][..entries.len()].copy_from_slice(entries);
    }

    /// R(i, j)
    pub fn get(&self, i: usize, j: usize) -> H {
        self.columns[j][i]
    }

    /// Solve `R[0..k, 0..k] · y = rhs[0..k]` in place (y overwrites rhs).
    ///
    /// A zero or non-finite pivot sets that coefficient to zero instead of
    /// dividing; the breakdown test in the basis builder keeps this from
    /// happening for any column it accepted.
    pub fn back_substitute(&self, rhs: &mut [H], k: usize) {
        for i in (0..k).rev() {
            // row i, columns i+1..k: R(i, j) lives in columns[j][i]
            for j in (i + 1)..k {
                rhs[i] = rhs[i] - self.get(i, j) * rhs[j];
            }
            let pivot = self.get(i, i);
            if pivot != H::zero() && pivot.is_finite() {
                rhs[i] = rhs[i] / pivot;
            } else {
                log::warn!("zero pivot at row {i} of the GMRES triangular factor, coefficient dropped");
                rhs[i] = H::zero();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// R = [[2, 1, -1],
    ///      [0, 4,  2],
    ///      [0, 0,  5]]
    fn sample() -> UpperTriangular<f64> {
        let mut r = UpperTriangular::new(3);
        r.set_column(0, &[2.0]);
        r.set_column(1, &[1.0, 4.0]);
        r.set_column(2, &[-1.0, 2.0, 5.0]);
        r
    }

    #[test]
    fn column_storage_is_transposed() {
        let r = sample();
        assert_eq!(r.get(0, 1), 1.0);
        assert_eq!(r.get(1, 2), 2.0);
        // below the diagonal stays zero
        assert_eq!(r.get(1, 0), 0.0);
        assert_eq!(r.get(2, 1), 0.0);
    }

    #[test]
    fn back_substitution_solves_full_block() {
        let r = sample();
        // y = [1, -1, 2] -> R y = [2 - 1 - 2, -4 + 4, 10] = [-1, 0, 10]
        let mut rhs = vec![-1.0, 0.0, 10.0];
        r.back_substitute(&mut rhs, 3);
        assert_abs_diff_eq!(rhs[0], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(rhs[1], -1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(rhs[2], 2.0, epsilon = 1e-14);
    }

    #[test]
    fn back_substitution_uses_leading_block_only() {
        let r = sample();
        // leading 2x2 block: [[2,1],[0,4]] y = [4, 8] -> y = [1, 2]
        let mut rhs = vec![4.0, 8.0, 123.0];
        r.back_substitute(&mut rhs, 2);
        assert_abs_diff_eq!(rhs[0], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(rhs[1], 2.0, epsilon = 1e-14);
        assert_eq!(rhs[2], 123.0);
    }

    #[test]
    fn signed_diagonal_is_fine() {
        let mut r = UpperTriangular::new(2);
        r.set_column(0, &[-2.0]);
        r.set_column(1, &[3.0, -1.0]);
        // y = [1, 1] -> [-2 + 3, -1] = [1, -1]
        let mut rhs = vec![1.0, -1.0];
        r.back_substitute(&mut rhs, 2);
        assert_abs_diff_eq!(rhs[0], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(rhs[1], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn zero_pivot_drops_coefficient() {
        let mut r = UpperTriangular::new(2);
        r.set_column(0, &[1.0]);
        r.set_column(1, &[1.0, 0.0]);
        let mut rhs = vec![3.0, 7.0];
        r.back_substitute(&mut rhs, 2);
        assert_eq!(rhs[1], 0.0);
        assert_eq!(rhs[0], 3.0);
        assert!(rhs.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn reset_clears_and_resizes() {
        let mut r = sample();
        r.reset(2);
        assert_eq!(r.dim(), 2);
        assert_eq!(r.get(0, 1), 0.0);
        assert_eq!(r.get(1, 1), 0.0);
    }
}
