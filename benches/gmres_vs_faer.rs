use criterion::{black_box, Criterion, criterion_group, criterion_main};
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use hgmres::solver::{GmresSolver, LinearSolver};
use hgmres::GmresConfig;

fn bench_gmres_vs_faer(c: &mut Criterion) {
    let n = 200;
    let data: Vec<f64> = (0..n*n).map(|i| (i as f64).sin()).collect();
    // diagonal shift keeps the system well conditioned for the iterative solver
    let a = Mat::from_fn(n, n, |i, j| data[j * n + i] + if i == j { n as f64 } else { 0.0 });
    let b: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();

    for krylov_dim in [10, 30] {
        c.bench_function(&format!("hgmres restart {krylov_dim}"), |ben| {
            let mut solver = GmresSolver::new(GmresConfig::new(1e-10, 1000, krylov_dim));
            ben.iter(|| {
                let mut x = vec![0.0; n];
                let _stats = solver.solve(black_box(&a), None, black_box(&b), &mut x).unwrap();
            })
        });
    }

    c.bench_function("faer raw LU", |ben| {
        ben.iter(|| {
            let factor = faer::linalg::solvers::FullPivLu::new(a.as_ref());
            let mut y = b.clone();
            let n = y.len();
            let y_mat = faer::MatMut::from_column_major_slice_mut(&mut y, n, 1);
            factor.solve_in_place_with_conj(faer::Conj::No, y_mat);
        })
    });
}

criterion_group!(benches, bench_gmres_vs_faer);
criterion_main!(benches);
