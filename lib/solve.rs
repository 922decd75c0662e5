//! Functions to compute the least-stable eigenpair of an assembled
//! [`EigenOperator`].
//!
//! "Least stable" is the eigenvalue `ω̂²` with the smallest real part: the most
//! negative `ω̂²` maps to the largest imaginary frequency under the principal
//! square root (see [`growth`][crate::growth]). Only one eigenpair is computed,
//! never the full spectrum, unless the [dense method][Method::Dense] is
//! requested explicitly.

use ndarray as nd;
use ndarray_linalg::{ Eig, InverseInto };
use num_complex::Complex64 as C64;
use crate::{
    assemble::EigenOperator,
    error::{ SolveError, Stage },
    tridiag::SymTridiagonal,
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type SolveResult<T> = Result<T, SolveError>;

/// A single solution to the eigenproblem.
///
/// The eigenvector carries an arbitrary complex scale; normalization is left
/// to [`normalize`][crate::normalize].
#[derive(Clone, Debug)]
pub struct Eigenpair {
    /// Eigenvalue `ω̂²` (s^-2).
    pub value: C64,
    /// Eigenvector (unnormalized streamfunction).
    pub vector: nd::Array1<C64>,
    /// Iterations spent (bisection + inverse iteration); zero for the dense
    /// method.
    pub iters: usize,
}

/// Solving method selector and parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Method {
    /// Use [Sturm-sequence bisection with inverse iteration][solve_bisection].
    Bisection {
        /// Relative accuracy bound on the eigenvalue (default: `1e-12`).
        epsilon: f64,
        /// Maximum number of iterations per stage (default: `1000`).
        maxiters: usize,
    },
    /// Use a [dense general eigen-decomposition][solve_dense].
    Dense,
}

impl Default for Method {
    fn default() -> Self {
        Self::Bisection { epsilon: DEF_EPSILON, maxiters: DEF_MAXITERS }
    }
}

/// Master solving function for all [methods][Method].
pub fn solve_least_stable(op: &EigenOperator, method: Method)
    -> SolveResult<Eigenpair>
{
    match method {
        Method::Bisection { epsilon, maxiters } => {
            solve_bisection(&op.a, op.m.as_ref(), epsilon, maxiters)
        },
        Method::Dense => solve_dense(&op.a, op.m.as_ref()),
    }
}

// deterministic start vector with a non-zero projection onto every eigenvector
// of a tridiagonal pencil with no zero off-diagonals
fn start_vector(n: usize) -> nd::Array1<f64> {
    let x: nd::Array1<f64>
        = (0..n)
        .map(|k| 1.0 + 0.5 * (k as f64 * 1.618_033_988_749_895).sin())
        .collect();
    let norm = x.dot(&x).sqrt();
    x / norm
}

fn count_below(a: &SymTridiagonal, m: &SymTridiagonal, sigma: f64) -> usize {
    a.pencil(m, sigma).negative_count()
}

/// Find the smallest eigenvalue of the symmetric-definite pencil `(A, M)` by
/// bisection on the Sturm (inertia) count, then its eigenvector by
/// shift-invert (inverse) iteration.
///
/// `M` must be symmetric positive-definite; `None` stands for the identity.
/// Under these conditions every eigenvalue is real.
///
/// The eigenvalue is bracketed until the bracket is narrower than `epsilon`
/// relative to the eigenvalue (or no further float lies between its ends).
/// Inverse iteration is then performed with the shift at the lower end of the
/// bracket until the residual `‖A ψ - ω̂² M ψ‖` falls below `epsilon` relative
/// to `(‖A‖ + |ω̂²| ‖M‖) ‖ψ‖`. Each stage (bracket expansion, bisection, inverse
/// iteration) is limited to `maxiters` iterations and returns
/// [`SolveError::NoConvergence`] when the limit is reached.
pub fn solve_bisection(
    a: &SymTridiagonal,
    m: Option<&SymTridiagonal>,
    epsilon: f64,
    maxiters: usize,
) -> SolveResult<Eigenpair>
{
    let n = a.len();
    let mass = m.cloned().unwrap_or_else(|| SymTridiagonal::identity(n));
    let (ga, gb) = a.gershgorin();
    let anorm = ga.abs().max(gb.abs());
    if anorm == 0.0 {
        // A = 0: every eigenvalue is zero and every vector an eigenvector
        let vector = start_vector(n).mapv(C64::from);
        return Ok(Eigenpair { value: C64::new(0.0, 0.0), vector, iters: 0 });
    }
    let mnorm = mass.inf_norm();

    // bracket [lo, hi] with no eigenvalue below lo and at least one below hi
    let ones: nd::Array1<f64> = nd::Array1::ones(n);
    let mut hi = ones.dot(&a.matvec(&ones)) / ones.dot(&mass.matvec(&ones));
    let mut lo = ga.min(0.0);
    let mut width = 1e-3 * anorm;
    let mut iters: usize = 0;
    let mut k: usize = 0;
    while count_below(a, &mass, lo) > 0 {
        k += 1;
        if k >= maxiters {
            return Err(SolveError::NoConvergence {
                stage: Stage::Bracket, maxiters });
        }
        lo -= width;
        width *= 2.0;
    }
    width = 1e-3 * anorm;
    while count_below(a, &mass, hi) == 0 {
        k += 1;
        if k >= maxiters {
            return Err(SolveError::NoConvergence {
                stage: Stage::Bracket, maxiters });
        }
        hi += width;
        width *= 2.0;
    }
    iters += k;

    let abstol = f64::EPSILON * anorm;
    let mut converged = false;
    for _ in 0..maxiters {
        if hi - lo <= epsilon * lo.abs().max(hi.abs()) + abstol {
            converged = true;
            break;
        }
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            converged = true;
            break;
        }
        if count_below(a, &mass, mid) == 0 { lo = mid; } else { hi = mid; }
        iters += 1;
    }
    if !converged {
        return Err(SolveError::NoConvergence {
            stage: Stage::Bisection, maxiters });
    }
    let value = 0.5 * (lo + hi);

    let shifted = a.pencil(&mass, lo);
    let tol = epsilon.max(16.0 * f64::EPSILON * (n as f64).sqrt())
        * (anorm + value.abs() * mnorm);
    let mut x = start_vector(n);
    for _ in 0..maxiters {
        iters += 1;
        let y = shifted.solve(&mass.matvec(&x));
        let norm = y.dot(&y).sqrt();
        if !norm.is_finite() || norm == 0.0 { break; }
        x = y / norm;
        let r = a.matvec(&x) - mass.matvec(&x) * value;
        if r.dot(&r).sqrt() <= tol {
            let vector = x.mapv(C64::from);
            return Ok(Eigenpair { value: C64::new(value, 0.0), vector, iters });
        }
    }
    Err(SolveError::NoConvergence { stage: Stage::InverseIteration, maxiters })
}

/// Compute the full spectrum of `M⁻¹ A` with a dense general eigensolver and
/// return the eigenpair with the smallest real part (the first one, in the
/// solver's order, among ties).
///
/// This costs `O(n³)` time and `O(n²)` memory and is intended for small grids
/// and for cross-checking [`solve_bisection`].
pub fn solve_dense(a: &SymTridiagonal, m: Option<&SymTridiagonal>)
    -> SolveResult<Eigenpair>
{
    let a_dense = a.to_dense();
    let H: nd::Array2<f64> = match m {
        Some(m) => m.to_dense().inv_into()?.dot(&a_dense),
        None => a_dense,
    };
    let (evals, evecs): (nd::Array1<C64>, nd::Array2<C64>) = H.eig()?;
    let (k, value)
        = evals.iter().enumerate()
        .min_by(|(_, l), (_, r)| l.re.total_cmp(&r.re))
        .ok_or(SolveError::EmptySpectrum)?;
    Ok(Eigenpair { value: *value, vector: evecs.column(k).to_owned(), iters: 0 })
}
