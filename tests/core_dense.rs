//! Tests for core dense operations: matrix-vector multiplication, dot product, norm,
//! and the `KrylovVector` operations the GMRES kernel relies on.

use approx::assert_abs_diff_eq;
use faer::Mat;
use hgmres::core::traits::{InnerProduct, KrylovVector, MatVec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Test matrix-vector multiplication for a small random dense matrix.
///
/// This test constructs a random 5x5 matrix and a random vector, computes the matrix-vector
/// product using the MatVec trait, and checks the result against a manual computation.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = StdRng::seed_from_u64(7);
    let vals: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    // Use from_fn to build a column-major matrix
    let a = Mat::from_fn(n, n, |i, j| vals[j * n + i]);
    let x: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let mut y = vec![0.0; n];
    a.matvec(&x, &mut y);

    // check y[i] == sum_j A[i,j]*x[j]
    for i in 0..n {
        let expected = (0..n).map(|j| vals[j * n + i] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
    }

    // the borrowed view agrees with the owned matrix
    let mut y_ref = vec![0.0; n];
    a.as_ref().matvec(&x, &mut y_ref);
    assert_eq!(y, y_ref);
}

/// Test matrix-vector multiplication for a rectangular matrix.
#[test]
fn matvec_rectangular() {
    let a = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    let x = vec![1.0, -1.0, 2.0];
    let mut y = vec![0.0; 2];
    a.matvec(&x, &mut y);
    assert_eq!(y, vec![0.0 - 1.0 + 4.0, 3.0 - 4.0 + 10.0]);
}

/// Test dot product and Euclidean norm for small vectors.
///
/// This test verifies that the InnerProduct trait correctly computes the dot product and
/// the Euclidean norm (L2 norm) for two small vectors, comparing against manual calculations.
#[test]
fn dot_and_norm() {
    let x = vec![1.0, 2.0, 3.0];
    let y = vec![4.0, -5.0, 6.0];
    let ip = ();
    let dot = ip.dot(&x, &y);
    assert_abs_diff_eq!(dot, 1.0 * 4.0 + 2.0 * (-5.0) + 3.0 * 6.0, epsilon = 1e-12);
    let norm_x = ip.norm(&x);
    let expected_norm = ((1.0f64).powi(2) + 2.0f64.powi(2) + 3.0f64.powi(2)).sqrt();
    assert_abs_diff_eq!(norm_x, expected_norm, epsilon = 1e-12);
}

/// Large vectors exercise the parallel reduction path when the `rayon` feature is on.
#[test]
fn dot_large_matches_serial_sum() {
    let n = 100_000;
    let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.001).sin()).collect();
    let y: Vec<f64> = (0..n).map(|i| (i as f64 * 0.002).cos()).collect();
    let serial: f64 = x.iter().zip(&y).map(|(a, b)| a * b).sum();
    assert_abs_diff_eq!(().dot(&x, &y), serial, epsilon = 1e-8);
}

/// Prefix copies and element access used when building reflectors.
#[test]
fn krylov_vector_prefix_ops() {
    let src: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0];
    let mut u = <Vec<f64> as KrylovVector>::zeros(4);
    u.copy_prefix_from(&src, 3);
    assert_eq!(u, vec![1.0, 2.0, 3.0, 0.0]);
    u.set(3, 7.0);
    assert_eq!(KrylovVector::get(&u, 3), 7.0);
    let mut head = [0.0; 2];
    u.read_prefix(&mut head);
    assert_eq!(head, [1.0, 2.0]);
    u.axpy(-1.0, &src);
    assert_eq!(u, vec![0.0, 0.0, 0.0, 3.0]);
}
