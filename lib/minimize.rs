//! Bounded scalar minimization via Brent's method.
//!
//! ```
//! use symstab::minimize::fminbound;
//!
//! let min = fminbound(|x| (x - 2.0).powi(2) + 1.0, (0.0, 5.0), 1e-8, 500)
//!     .unwrap();
//! assert!((min.x - 2.0).abs() < 1e-6);
//! assert!((min.fx - 1.0).abs() < 1e-10);
//! ```

use crate::error::MinimizeError;

pub type MinimizeResult<T> = Result<T, MinimizeError>;

/// Result of a bounded minimization.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Minimum {
    /// Location of the minimum.
    pub x: f64,
    /// Function value at the minimum.
    pub fx: f64,
    /// Number of function evaluations used.
    pub nfev: usize,
}

// golden-section fraction (3 - √5) / 2
const GOLDEN: f64 = 0.381_966_011_250_105_1;

fn sign_nonzero(x: f64) -> f64 { if x < 0.0 { -1.0 } else { 1.0 } }

/// Find a local minimum of `f` on the closed interval `bounds` using Brent's
/// method (golden-section search with parabolic interpolation steps).
///
/// Iteration stops once the minimum is bracketed to within roughly `xtol`
/// (absolute). The function is never evaluated at the interval endpoints.
/// Returns [`MinimizeError::NoConvergence`] if more than `maxiters` function
/// evaluations are needed.
///
/// For functions with several local minima, the one found is the one whose
/// basin contains the first golden-section point; callers should choose
/// `bounds` accordingly.
pub fn fminbound<F>(mut f: F, bounds: (f64, f64), xtol: f64, maxiters: usize)
    -> MinimizeResult<Minimum>
where F: FnMut(f64) -> f64
{
    let (mut a, mut b) = bounds;
    if !(a < b) { return Err(MinimizeError::BadBounds(a, b)); }
    if !(xtol > 0.0) { return Err(MinimizeError::BadTolerance(xtol)); }
    let sqrt_eps = f64::EPSILON.sqrt();

    // xf: best point so far; nfc: second best; fulc: previous second best
    let mut fulc = a + GOLDEN * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat: f64 = 0.0;
    let mut e: f64 = 0.0;
    let mut fx = f(xf);
    let mut ffulc = fx;
    let mut fnfc = fx;
    let mut nfev: usize = 1;
    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + xtol / 3.0;
    let mut tol2 = 2.0 * tol1;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        if nfev >= maxiters {
            return Err(MinimizeError::NoConvergence(maxiters));
        }
        let mut golden = true;
        if e.abs() > tol1 {
            // try a parabolic step through the three best points
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 { p = -p; }
            q = q.abs();
            r = e;
            e = rat;
            if p.abs() < (0.5 * q * r).abs()
                && p > q * (a - xf)
                && p < q * (b - xf)
            {
                rat = p / q;
                let x = xf + rat;
                if x - a < tol2 || b - x < tol2 {
                    rat = tol1 * sign_nonzero(xm - xf);
                }
            } else {
                golden = true;
            }
        }
        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = GOLDEN * e;
        }

        let x = xf + sign_nonzero(rat) * rat.abs().max(tol1);
        let fu = f(x);
        nfev += 1;

        if fu <= fx {
            if x >= xf { a = xf; } else { b = xf; }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf { a = x; } else { b = x; }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + xtol / 3.0;
        tol2 = 2.0 * tol1;
    }
    Ok(Minimum { x: xf, fx, nfev })
}
