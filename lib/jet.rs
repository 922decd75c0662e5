//! Hyperbolic-tangent jet and its absolute vorticity.
//!
//! The background flow is an along-channel jet
//! ```text
//! V(x) = V0 sech²((x - x_mid) / δ)
//! ```
//! whose absolute vorticity is the planetary vorticity plus the jet's relative
//! vorticity,
//! ```text
//!                2 V0      x - x_mid         x - x_mid
//! ζ(x) = f - ---- tanh(---------) sech²(---------)
//!                 δ           δ                 δ
//! ```
//! Symmetric instability is possible wherever *f* *ζ* < 0.

use ndarray as nd;
use crate::{
    Arr1,
    error::MinimizeError,
    minimize::{ self, Minimum },
    DEF_MAXITERS,
};

/// Parameters of the jet: planetary vorticity `f` (s^-1), peak velocity `v0`
/// (m s^-1), centre `x_mid` (m) and half-width `delta_b` (m).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Jet {
    pub f: f64,
    pub v0: f64,
    pub x_mid: f64,
    pub delta_b: f64,
}

impl Jet {
    fn s(&self, x: f64) -> f64 { (x - self.x_mid) / self.delta_b }

    /// Along-channel velocity `V0 sech²((x - x_mid)/δ)`.
    pub fn velocity(&self, x: f64) -> f64 {
        self.v0 * self.s(x).cosh().powi(2).recip()
    }

    /// Relative vorticity `∂V/∂x`.
    pub fn relative_vorticity(&self, x: f64) -> f64 {
        let s = self.s(x);
        -2.0 * self.v0 / self.delta_b * s.tanh() * s.cosh().powi(2).recip()
    }

    /// Absolute vorticity `f + ∂V/∂x` at a single point.
    ///
    /// Finite for every finite `x`; far from the jet this tends to `f`.
    pub fn zeta(&self, x: f64) -> f64 { self.f + self.relative_vorticity(x) }

    /// Absolute vorticity sampled over an array of points.
    pub fn zeta_array<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.zeta(xk))
    }

    /// Location of the vorticity minimum in closed form,
    /// `x_mid + δ atanh(1/√3)` (for `V0 > 0`).
    pub fn analytic_minimum(&self) -> f64 {
        self.x_mid + self.delta_b * 3.0_f64.sqrt().recip().atanh()
    }

    /// Upper bound `sqrt(-f ζ_min)` on the inviscid growth rate of any mode,
    /// or 0 when `f ζ > 0` everywhere.
    pub fn inviscid_growth_bound(&self) -> f64 {
        let zmin = self.zeta(self.analytic_minimum())
            .min(self.zeta(2.0 * self.x_mid - self.analytic_minimum()));
        let fz = self.f * zmin;
        if fz < 0.0 { (-fz).sqrt() } else { 0.0 }
    }

    /// Mask of points where `f ζ < 0`.
    pub fn unstable_region<S>(&self, x: &Arr1<S>) -> nd::Array1<bool>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.f * self.zeta(xk) < 0.0)
    }

    /// Numerically locate the vorticity minimum within `bounds` to an absolute
    /// tolerance `xtol` (m) with Brent's bounded method.
    ///
    /// `bounds` must contain the basin of the global minimum and no other
    /// local minimum, or the search may settle on a bound instead. For
    /// `V0 > 0` the minimum lies right of `x_mid`; for `V0 < 0` it is mirrored
    /// to the left. A `xtol` of about a tenth of the grid spacing is
    /// sufficient to pick the nearest grid point reliably.
    pub fn locate_vorticity_minimum(&self, bounds: (f64, f64), xtol: f64)
        -> Result<Minimum, MinimizeError>
    {
        minimize::fminbound(|x| self.zeta(x), bounds, xtol, DEF_MAXITERS)
    }
}
