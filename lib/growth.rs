//! Viscous growth rates derived from the eigenvalues of a sweep.
//!
//! For an eigenvalue `ω̂²` at vertical wavenumber `m`, the inviscid frequency
//! is the principal square root `ω̂`, and vertical viscosity `A` damps the
//! mode at a rate `A m²`:
//! ```text
//! ω = ω̂ - i A m²
//! σ = Im ω
//! ```
//! Only the growing branch `σ ≥ 0` is retained; every other point is masked
//! with NaN.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ ConfigError, LengthError, StabError },
    units,
    utils::nan_argmax_in,
};

/// Principal complex square root, with the branch cut along the negative real
/// axis approached from above.
///
/// A signed-zero imaginary part is disregarded, so that every negative real
/// `z` maps to `+i √|z|`. A negative eigenvalue `ω̂²` therefore always yields
/// a positive growth rate.
///
/// ```
/// use num_complex::Complex64 as C64;
/// use symstab::growth::principal_sqrt;
///
/// let w = principal_sqrt(C64::new(-4.0, -0.0));
/// assert_eq!(w, C64::new(0.0, 2.0));
/// ```
pub fn principal_sqrt(z: C64) -> C64 {
    if z.im == 0.0 {
        C64::new(z.re, 0.0).sqrt()
    } else {
        z.sqrt()
    }
}

/// Growth rate `Im(√ω̂² - i A m²)` for a single point, without masking.
pub fn growth_rate(eigen_value: C64, m2: f64, viscosity: f64) -> f64 {
    (principal_sqrt(eigen_value) - C64::i() * viscosity * m2).im
}

/// Growth rates over a `(viscosity, λ)` grid.
#[derive(Clone, Debug)]
pub struct GrowthRateField {
    /// Viscosities (m^2 s^-1), row coordinate.
    pub viscosity: nd::Array1<f64>,
    /// Vertical wavelengths (m), column coordinate.
    pub lambda: nd::Array1<f64>,
    /// Squared vertical wavenumbers (m^-2) of each column.
    pub m2: nd::Array1<f64>,
    /// Growth rate `σ` (s^-1); NaN where `σ < 0`.
    pub sigma: nd::Array2<f64>,
    /// `σ / f`.
    pub sigma_normalised: nd::Array2<f64>,
}

/// Compute the masked growth-rate field for every pair of viscosity and
/// wavelength.
///
/// `eigen_values`, `lambda` and `m2` are indexed by wavelength, as in a
/// [`SweepResult`][crate::sweep::SweepResult]. The wavelengths are carried
/// through unchanged so that [`extract_unstable_mode`] reports them exactly.
/// Fails if the three differ in length, if any viscosity is negative or
/// non-finite, or if `f` is non-finite.
pub fn compute_growth_rates<S, T, U, V>(
    eigen_values: &Arr1<S>,
    lambda: &Arr1<T>,
    m2: &Arr1<U>,
    viscosities: &Arr1<V>,
    f: f64,
) -> Result<GrowthRateField, StabError>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    V: nd::Data<Elem = f64>,
{
    LengthError::check(eigen_values, lambda)?;
    LengthError::check(lambda, m2)?;
    viscosities.iter().try_for_each(|&a| ConfigError::check_viscosity(a))?;
    ConfigError::check_finite("f", f)?;
    let sigma: nd::Array2<f64>
        = nd::Array2::from_shape_fn(
            (viscosities.len(), m2.len()),
            |(i, j)| {
                let s = growth_rate(eigen_values[j], m2[j], viscosities[i]);
                if s >= 0.0 { s } else { f64::NAN }
            },
        );
    let sigma_normalised = sigma.mapv(|s| s / f);
    Ok(GrowthRateField {
        viscosity: viscosities.to_owned(),
        lambda: lambda.to_owned(),
        m2: m2.to_owned(),
        sigma,
        sigma_normalised,
    })
}

/// Most unstable mode for each viscosity.
///
/// Every array is indexed by viscosity; rows with no unstable wavelength hold
/// NaN in every field except `viscosity`.
#[derive(Clone, Debug)]
pub struct UnstableModeSummary {
    /// Viscosities (m^2 s^-1).
    pub viscosity: nd::Array1<f64>,
    /// Most unstable wavelength `λ*` (m).
    pub lambda_star: nd::Array1<f64>,
    /// Maximum growth rate `σ*` (s^-1).
    pub sigma_star: nd::Array1<f64>,
    /// e-folding time `1 / σ*` (days); `+∞` for `σ* = 0`.
    pub timescale_days: nd::Array1<f64>,
}

/// Find the most unstable wavelength in each viscosity row of `field`.
///
/// Columns are scanned in ascending-λ order whatever their storage order, so
/// ties go to the shortest wavelength. Masked points never win, and a fully
/// masked row produces NaN rather than an error.
pub fn extract_unstable_mode(field: &GrowthRateField) -> UnstableModeSummary {
    let lambda = &field.lambda;
    let mut order: Vec<usize>
        = (0..lambda.len().min(field.sigma.ncols())).collect();
    order.sort_by(|&a, &b| lambda[a].total_cmp(&lambda[b]));
    let nv = field.viscosity.len();
    let mut lambda_star: nd::Array1<f64> = nd::Array1::from_elem(nv, f64::NAN);
    let mut sigma_star: nd::Array1<f64> = nd::Array1::from_elem(nv, f64::NAN);
    field.sigma.outer_iter().enumerate()
        .filter_map(|(i, row)| {
            nan_argmax_in(&row, order.iter().copied()).map(|best| (i, best))
        })
        .for_each(|(i, (j, s))| {
            lambda_star[i] = lambda[j];
            sigma_star[i] = s;
        });
    let timescale_days = sigma_star.mapv(units::rate_to_days);
    UnstableModeSummary {
        viscosity: field.viscosity.clone(),
        lambda_star,
        sigma_star,
        timescale_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{ PI, TAU };
    use approx::assert_relative_eq;

    fn wavenumbers2(lambda: &nd::Array1<f64>) -> nd::Array1<f64> {
        lambda.mapv(|l| units::wavenumber(l).powi(2))
    }

    #[test]
    fn principal_sqrt_branch() {
        assert_eq!(principal_sqrt(C64::new(-9.0, 0.0)), C64::new(0.0, 3.0));
        assert_eq!(principal_sqrt(C64::new(-9.0, -0.0)), C64::new(0.0, 3.0));
        assert_eq!(principal_sqrt(C64::new(4.0, 0.0)), C64::new(2.0, 0.0));
        let w = principal_sqrt(C64::new(-1.0, -1e-3));
        assert!(w.im < 0.0);
        assert_relative_eq!(
            w * w, C64::new(-1.0, -1e-3), max_relative = 1e-12);
    }

    #[test]
    fn inviscid_growth_is_sqrt_of_negative_eigenvalue() {
        let ev = nd::array![
            C64::new(-4e-12, 0.0),
            C64::new(1e-12, 0.0),
            C64::new(-1e-10, 0.0),
        ];
        let m2 = nd::array![1.0, 2.0, 3.0];
        let lambda = m2.mapv(|m2: f64| std::f64::consts::TAU / m2.sqrt());
        let field = compute_growth_rates(
            &ev, &lambda, &m2, &nd::array![0.0], 1e-5).unwrap();
        assert_relative_eq!(field.sigma[[0, 0]], 2e-6, max_relative = 1e-12);
        // stable oscillation: σ = 0 exactly, not masked
        assert_eq!(field.sigma[[0, 1]], 0.0);
        assert_relative_eq!(field.sigma[[0, 2]], 1e-5, max_relative = 1e-12);
        assert_relative_eq!(
            field.sigma_normalised[[0, 2]], 1.0, max_relative = 1e-12);
        for (j, z) in ev.iter().enumerate() {
            assert_eq!(field.sigma[[0, j]], principal_sqrt(*z).im);
        }
    }

    #[test]
    fn viscosity_damps_and_masks() {
        let ev = nd::array![C64::new(-1e-10, 0.0), C64::new(-1e-10, 0.0)];
        let m2 = nd::array![1e-4, 1e-2];
        let lambda = nd::array![200.0 * PI, 20.0 * PI];
        let visc = nd::array![0.0, 1e-2];
        let field
            = compute_growth_rates(&ev, &lambda, &m2, &visc, 1e-5).unwrap();
        assert_relative_eq!(
            field.sigma[[1, 0]], 1e-5 - 1e-6, max_relative = 1e-12);
        // 1e-5 - 1e-4 < 0
        assert!(field.sigma[[1, 1]].is_nan());
        assert!(field.sigma_normalised[[1, 1]].is_nan());
    }

    #[test]
    fn rejects_bad_inputs() {
        let ev = nd::array![C64::new(-1.0, 0.0)];
        let one = nd::array![1.0];
        let two = nd::array![1.0, 2.0];
        let zero = nd::array![0.0];
        assert!(matches!(
            compute_growth_rates(&ev, &one, &two, &zero, 1.0),
            Err(StabError::Length(_))
        ));
        assert!(matches!(
            compute_growth_rates(&ev, &two, &two, &zero, 1.0),
            Err(StabError::Length(_))
        ));
        let negative = nd::array![-1.0];
        assert!(matches!(
            compute_growth_rates(&ev, &one, &one, &negative, 1.0),
            Err(StabError::InvalidConfiguration(ConfigError::BadViscosity(_)))
        ));
        assert!(matches!(
            compute_growth_rates(&ev, &one, &one, &zero, f64::NAN),
            Err(StabError::InvalidConfiguration(ConfigError::NonFinite(..)))
        ));
    }

    #[test]
    fn unstable_mode_per_row() {
        let lambda = nd::array![10.0, 20.0, 40.0];
        let m2 = wavenumbers2(&lambda);
        let ev = nd::Array1::from_elem(3, C64::new(-1e-10, 0.0));
        let visc = nd::array![0.0, 1e-6, 1.0];
        let field
            = compute_growth_rates(&ev, &lambda, &m2, &visc, 1e-5).unwrap();
        let summary = extract_unstable_mode(&field);
        // all equal without viscosity: shortest wins
        assert_eq!(summary.lambda_star[0], 10.0);
        assert_relative_eq!(summary.sigma_star[0], 1e-5, max_relative = 1e-12);
        assert_relative_eq!(
            summary.timescale_days[0],
            1.0 / (1e-5 * 86400.0),
            max_relative = 1e-12,
        );
        // viscosity favors the longest wave
        assert_eq!(summary.lambda_star[1], 40.0);
        // completely stabilized
        assert!(summary.lambda_star[2].is_nan());
        assert!(summary.sigma_star[2].is_nan());
        assert!(summary.timescale_days[2].is_nan());
        assert_eq!(summary.viscosity, visc);
    }

    #[test]
    fn zero_growth_has_infinite_timescale() {
        let ev = nd::array![C64::new(1e-12, 0.0)];
        let field = compute_growth_rates(
            &ev, &nd::array![TAU], &nd::array![1.0], &nd::array![0.0], 1e-5)
            .unwrap();
        let summary = extract_unstable_mode(&field);
        assert_eq!(summary.sigma_star[0], 0.0);
        assert!(summary.timescale_days[0].is_infinite());
    }

    #[test]
    fn ties_go_to_shortest_wavelength_in_any_order() {
        let lambda = nd::array![40.0, 20.0, 10.0];
        let m2 = wavenumbers2(&lambda);
        let ev = nd::Array1::from_elem(3, C64::new(-1e-10, 0.0));
        let field = compute_growth_rates(
            &ev, &lambda, &m2, &nd::array![0.0], 1e-5).unwrap();
        let summary = extract_unstable_mode(&field);
        assert_eq!(summary.lambda_star[0], 10.0);
        assert_relative_eq!(summary.sigma_star[0], 1e-5, max_relative = 1e-12);

        let shuffled = nd::array![20.0, 40.0, 10.0];
        let field = compute_growth_rates(
            &ev, &shuffled, &wavenumbers2(&shuffled), &nd::array![0.0], 1e-5)
            .unwrap();
        assert_eq!(extract_unstable_mode(&field).lambda_star[0], 10.0);
    }

    #[test]
    fn unstable_wavelength_is_an_input_wavelength() {
        // 50 m is not recovered exactly from 2π / sqrt(m²)
        let lambda = nd::Array1::linspace(10.0, 600.0, 60);
        let m2 = wavenumbers2(&lambda);
        // growth peaks at 50 m without viscosity
        let ev = lambda.mapv(|l| {
            C64::new(-1e-10 / (1.0 + ((l - 50.0) / 20.0).powi(2)), 0.0)
        });
        let visc = nd::Array1::geomspace(1e-9, 1e-3, 20).unwrap();
        let visc = nd::concatenate![nd::Axis(0), nd::array![0.0], visc];
        let field
            = compute_growth_rates(&ev, &lambda, &m2, &visc, 1e-5).unwrap();
        assert_eq!(field.lambda, lambda);
        let summary = extract_unstable_mode(&field);
        assert_eq!(summary.lambda_star[0], 50.0);
        let finite: Vec<f64>
            = summary.lambda_star.iter().copied()
            .filter(|l| l.is_finite())
            .collect();
        assert!(finite.len() > 1);
        assert!(finite.iter().all(|l| lambda.iter().any(|li| li == l)));
    }
}
