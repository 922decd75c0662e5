//! Assembly of the eigen-operator for a single vertical wavenumber.
//!
//! For a streamfunction `ψ(x) exp(i (m z - ω̂ t))`, the discretized horizontal
//! structure equation reads
//! ```text
//!   N²                                   D2
//! - -- D2 ψ + f diag(ζ) ψ = ω̂² (I - --) ψ
//!   m²                                   m²
//! ```
//! where `D2` is the [curvature operator][crate::grid::curvature_operator].
//! Under the hydrostatic approximation the right-hand mass matrix reduces to
//! the identity.

use ndarray as nd;
use crate::{
    Arr1,
    error::ConfigError,
    tridiag::SymTridiagonal,
};

/// Left- and right-hand operators of `A ψ = ω̂² M ψ`.
#[derive(Clone, Debug)]
pub struct EigenOperator {
    /// `-N²/m² D2 + diag(f ζ)`.
    pub a: SymTridiagonal,
    /// `I - D2/m²`, or `None` in hydrostatic mode (standard eigenproblem).
    pub m: Option<SymTridiagonal>,
}

impl EigenOperator {
    /// Number of unknowns.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.a.len() }

    /// Return `true` if the problem is generalized (non-hydrostatic).
    pub fn is_generalized(&self) -> bool { self.m.is_some() }

    /// The right-hand operator, materializing the identity in hydrostatic mode.
    pub fn mass(&self) -> SymTridiagonal {
        self.m.clone().unwrap_or_else(|| SymTridiagonal::identity(self.len()))
    }
}

/// Assemble the eigen-operator for vertical wavenumber `m`.
///
/// `zeta` is the absolute vorticity sampled on the same grid as `d2`. Fails if
/// `m` is zero or non-finite, or if `zeta` and `d2` disagree in size.
pub fn assemble<S>(
    m: f64,
    N2: f64,
    f: f64,
    zeta: &Arr1<S>,
    d2: &SymTridiagonal,
    hydrostatic: bool,
) -> Result<EigenOperator, ConfigError>
where S: nd::Data<Elem = f64>
{
    ConfigError::check_wavenumber(m)?;
    let m2 = m.powi(2);
    let fzeta: nd::Array1<f64> = zeta.mapv(|z| f * z);
    let a = d2.scaled(-N2 / m2).add_diag(&fzeta)?;
    let m = (!hydrostatic)
        .then(|| {
            SymTridiagonal::identity(d2.len()).add(&d2.scaled(-m2.recip()))
        })
        .transpose()?;
    Ok(EigenOperator { a, m })
}
