//! Householder basis for Walker's "simpler GMRES".
//!
//! One restart cycle grows a set of Householder vectors `U[0..k)` such that
//! `P_{k-1} ⋯ P_0 · A · [r₀, q₀, …, q_{k-2}] = R` is upper triangular, where
//! `P_i = I - 2 U[i] U[i]ᵀ` and `q_i = P_0 ⋯ P_i e_i` is the i-th column of the
//! implicit orthonormal factor. The Arnoldi basis is never formed explicitly:
//! each new Krylov direction is produced by reflecting a unit vector through
//! the existing reflectors (descending), applying the operator, and reflecting
//! back (ascending).
//!
//! # References
//! - H. F. Walker, L. Zhou. A simpler GMRES. Numer. Linear Algebra Appl. 1 (1994).
//! - H. F. Walker. Implementation of the GMRES method using Householder transformations. SIAM J. Sci. Stat. Comput. 9 (1988).

use crate::core::traits::{HostScalar, InnerProduct, KrylovVector, MatVec};
use crate::error::SolverError;
use crate::preconditioner::Preconditioner;
use crate::solver::lossy;
use crate::solver::triangular::UpperTriangular;
use crate::utils::convergence::Convergence;
use num_traits::{AsPrimitive, Float};

/// Why the basis stopped growing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasisExit {
    /// The next direction already lies in the span of the basis.
    Breakdown,
    /// The residual estimate dropped below tolerance.
    Converged,
    /// All `krylov_dim` steps were taken.
    Exhausted,
}

/// Result of one basis build.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BasisOutcome<H> {
    /// Number of accepted reflectors (effective Krylov dimension).
    pub k: usize,
    /// Residual-norm surrogate relative to `rho_0`, in `[0, 1]`.
    pub rho: H,
    pub exit: BasisExit,
}

/// v ← (I - 2 u uᵀ) v
pub fn reflect<V, H>(u: &V, v: &mut V)
where
    V: KrylovVector,
    (): InnerProduct<V, Scalar = H>,
    H: Float + AsPrimitive<V::Elem>,
{
    let ip = ();
    let two = H::one() + H::one();
    let coeff = ip.dot(u, v) * two;
    v.axpy((-coeff).as_(), u);
}

/// v ← P_0 P_1 ⋯ P_{k-1} v  (reflectors applied from the last one down to the first)
pub fn reflect_descending<V, H>(reflectors: &[V], v: &mut V)
where
    V: KrylovVector,
    (): InnerProduct<V, Scalar = H>,
    H: Float + AsPrimitive<V::Elem>,
{
    for u in reflectors.iter().rev() {
        reflect(u, v);
    }
}

/// v ← P_{k-1} ⋯ P_1 P_0 v  (reflectors applied from the first one up to the last)
pub fn reflect_ascending<V, H>(reflectors: &[V], v: &mut V)
where
    V: KrylovVector,
    (): InnerProduct<V, Scalar = H>,
    H: Float + AsPrimitive<V::Elem>,
{
    for u in reflectors {
        reflect(u, v);
    }
}

/// Per-cycle state: reflectors, triangular factor, projected right-hand side and scratch vectors.
pub struct HouseholderBasis<V, H> {
    reflectors: Vec<V>,
    factor: UpperTriangular<H>,
    projection_rhs: Vec<H>,
    candidate: V,
    scratch: V,
    problem_size: usize,
}

impl<V, H> HouseholderBasis<V, H>
where
    V: KrylovVector,
    (): InnerProduct<V, Scalar = H>,
    H: HostScalar<V::Elem>,
{
    /// Allocate for `krylov_dim` steps on vectors of length `problem_size`.
    ///
    /// `krylov_dim` is clamped to `problem_size`: a larger Krylov space cannot
    /// hold more independent directions than the problem has unknowns.
    pub fn new(krylov_dim: usize, problem_size: usize) -> Self {
        let dim = krylov_dim.min(problem_size);
        Self {
            reflectors: (0..dim).map(|_| V::zeros(problem_size)).collect(),
            factor: UpperTriangular::new(dim),
            projection_rhs: vec![H::zero(); dim],
            candidate: V::zeros(problem_size),
            scratch: V::zeros(problem_size),
            problem_size,
        }
    }

    /// Maximum number of steps per cycle (after clamping).
    pub fn krylov_dim(&self) -> usize {
        self.reflectors.len()
    }

    pub fn reflectors(&self) -> &[V] {
        &self.reflectors
    }

    pub fn factor(&self) -> &UpperTriangular<H> {
        &self.factor
    }

    pub fn projection_rhs(&self) -> &[H] {
        &self.projection_rhs
    }

    /// Zero every reflector, the factor and the projected rhs for a new cycle.
    pub fn reset(&mut self) {
        let n = self.problem_size;
        for u in &mut self.reflectors {
            u.resize(n);
            u.fill_zero();
        }
        self.factor.reset(self.reflectors.len());
        self.projection_rhs.iter_mut().for_each(|p| *p = H::zero());
    }

    /// Grow the basis from the normalized residual `res`.
    ///
    /// On return `res` holds `P_{k-1} ⋯ P_0 r₀` and `projection_rhs[0..k)` its
    /// leading entries. `iterations` is bumped once per attempted step. The
    /// convergence test is `|rho · rho_0 / norm_rhs| < tol`.
    #[allow(clippy::too_many_arguments)]
    pub fn build<M, P>(
        &mut self,
        a: &M,
        pc: &P,
        res: &mut V,
        conv: &Convergence<H>,
        rho_0: H,
        norm_rhs: H,
        iterations: &mut usize,
    ) -> Result<BasisOutcome<H>, SolverError>
    where
        M: MatVec<V>,
        P: Preconditioner<M, V> + ?Sized,
    {
        let ip = ();
        let ten: H = num_traits::cast(10.0_f64).unwrap_or_else(H::one);
        let breakdown_tol = H::epsilon() * ten;
        let mut rho = H::one();

        for k in 0..self.krylov_dim() {
            *iterations += 1;

            if k == 0 {
                // first direction: M⁻¹ A r₀
                a.matvec(res, &mut self.candidate);
                pc.apply(&mut self.candidate)?;
            } else {
                // q_{k-1} = P_0 ⋯ P_{k-1} e_{k-1}
                self.scratch.fill_zero();
                self.scratch.set(k - 1, <V::Elem as num_traits::One>::one());
                reflect_descending(&self.reflectors[..k], &mut self.scratch);
                // M⁻¹ A q_{k-1}, then P_{k-1} ⋯ P_0 applied to it
                a.matvec(&self.scratch, &mut self.candidate);
                pc.apply(&mut self.candidate)?;
                reflect_ascending(&self.reflectors[..k], &mut self.candidate);
            }

            // target w = [c_0, …, c_{k-1}, alpha, 0, …] with ‖w‖ = ‖c‖
            let u = &mut self.reflectors[k];
            u.fill_zero();
            u.copy_prefix_from(&self.candidate, k);
            let radicand = ip.dot(&self.candidate, &self.candidate) - ip.dot(u, u);
            let magnitude = radicand.max(H::zero()).sqrt();
            if !(magnitude >= breakdown_tol) {
                log::debug!(
                    "GMRES basis breakdown at step {k} (|alpha| = {:.3e})",
                    lossy(magnitude)
                );
                return Ok(BasisOutcome { k, rho, exit: BasisExit::Breakdown });
            }
            // sign opposite to c_k keeps c - w free of cancellation
            let c_k: H = self.candidate.get(k).into();
            let alpha = if c_k > H::zero() { -magnitude } else { magnitude };
            u.set(k, alpha.as_());

            // column k of R = leading k+1 entries of w
            let mut head = vec![<V::Elem as num_traits::Zero>::zero(); k];
            u.read_prefix(&mut head);
            let mut column: Vec<H> = head.into_iter().map(Into::into).collect();
            column.push(alpha);
            self.factor.set_column(k, &column);

            // U[k] = (c - w) / ‖c - w‖
            u.axpy(-<V::Elem as num_traits::One>::one(), &self.candidate);
            let norm = ip.norm(u);
            u.scale((-H::one() / norm).as_());

            reflect(&self.reflectors[k], res);

            // round-off can push |res[k]| past rho
            let raw: H = res.get(k).into();
            let zeta = raw.min(rho).max(-rho);
            if zeta != raw {
                res.set(k, zeta.as_());
            }
            self.projection_rhs[k] = zeta;

            rho = rho * (zeta / rho).acos().sin();
            log::trace!(
                "GMRES step {k}: zeta = {:.3e}, rho = {:.3e}",
                lossy(zeta),
                lossy(rho)
            );

            if rho == H::zero() || conv.check(rho * rho_0, norm_rhs).0 {
                return Ok(BasisOutcome { k: k + 1, rho, exit: BasisExit::Converged });
            }
        }

        Ok(BasisOutcome { k: self.krylov_dim(), rho, exit: BasisExit::Exhausted })
    }

    /// Back-substitute `R[0..k, 0..k] y = projection_rhs[0..k)` in place.
    pub fn solve_projection(&mut self, k: usize) {
        if log::log_enabled!(log::Level::Trace) {
            for i in 0..k {
                let row: Vec<f64> = (0..k).map(|j| lossy(self.factor.get(i, j))).collect();
                log::trace!("R[{i}] = {row:?} | {:e}", lossy(self.projection_rhs[i]));
            }
        }
        self.factor.back_substitute(&mut self.projection_rhs, k);
        if log::log_enabled!(log::Level::Trace) {
            let y: Vec<f64> = self.projection_rhs[..k].iter().map(|&v| lossy(v)).collect();
            log::trace!("triangular solve: y = {y:?}");
        }
    }

    /// Turn the solved coefficients into the (unscaled) correction `y_0 r₀ + Σ y_i q_{i-1}`.
    ///
    /// `res` must hold `P_{k-1} ⋯ P_0 r₀` as left by [`build`](Self::build).
    /// With `k == 0` no direction was accepted and the correction is zero.
    pub fn reconstruct(&self, k: usize, res: &mut V) {
        if k == 0 {
            res.fill_zero();
            return;
        }
        res.scale(self.projection_rhs[0].as_());
        // e_{i} carries the coefficient of q_i, which is y_{i+1}
        for i in 0..k - 1 {
            let value: H = res.get(i).into();
            res.set(i, (value + self.projection_rhs[i + 1]).as_());
        }
        reflect_descending(&self.reflectors[..k], res);
    }
}
