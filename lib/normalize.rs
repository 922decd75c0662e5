//! Sign correction and normalization of sweep eigenfunctions.
//!
//! Eigenfunctions come out of the solver with an arbitrary scale and sign.
//! Each row (one wavelength) is first flipped so that it is positive at a
//! reference grid point, normally the [vorticity
//! minimum][crate::sweep::Sweep::reference_index], and then rescaled in one of
//! two ways. Degenerate rows produce NaN instead of an error.

use ndarray as nd;
use crate::{
    Arr2,
    error::LengthError,
    utils::sign,
};

/// The three presentations of a set of eigenfunctions, all indexed by
/// `(λ, x)`.
#[derive(Clone, Debug)]
pub struct NormalizedEigenfunctions {
    /// `sign(ψ[x_ref]) ψ`; identically zero where `ψ[x_ref] = 0`.
    pub sign_corrected: nd::Array2<f64>,
    /// Sign-corrected rows divided by their sum over `x`.
    pub area_normalized: nd::Array2<f64>,
    /// Sign-corrected rows divided by their value at `x_ref`.
    pub max_normalized: nd::Array2<f64>,
}

// divide by `denom`, or fill with NaN if `denom` is zero
fn divide_row(row: nd::ArrayView1<f64>, denom: f64) -> nd::Array1<f64> {
    if denom == 0.0 {
        nd::Array1::from_elem(row.len(), f64::NAN)
    } else {
        row.mapv(|p| p / denom)
    }
}

/// Normalize eigenfunctions `psi`, indexed by `(λ, x)`, against the grid point
/// `reference_index`.
///
/// Fails only if `reference_index` is out of bounds for the `x` axis.
///
/// ```
/// use ndarray as nd;
/// use symstab::normalize::normalize;
///
/// let psi = nd::array![[1.0, -3.0, -2.0]];
/// let n = normalize(&psi, 1).unwrap();
/// assert_eq!(n.sign_corrected, nd::array![[-1.0, 3.0, 2.0]]);
/// assert_eq!(n.area_normalized, nd::array![[-0.25, 0.75, 0.5]]);
/// assert_eq!(n.max_normalized[[0, 1]], 1.0);
/// ```
pub fn normalize<S>(psi: &Arr2<S>, reference_index: usize)
    -> Result<NormalizedEigenfunctions, LengthError>
where S: nd::Data<Elem = f64>
{
    LengthError::check_index(psi.ncols(), reference_index)?;
    let mut sign_corrected: nd::Array2<f64> = psi.to_owned();
    sign_corrected.outer_iter_mut()
        .for_each(|mut row| {
            let s = sign(row[reference_index]);
            row.mapv_inplace(|p| s * p);
        });
    let mut area_normalized: nd::Array2<f64>
        = nd::Array2::zeros(psi.raw_dim());
    let mut max_normalized: nd::Array2<f64>
        = nd::Array2::zeros(psi.raw_dim());
    sign_corrected.outer_iter()
        .zip(area_normalized.outer_iter_mut())
        .zip(max_normalized.outer_iter_mut())
        .for_each(|((row, mut area), mut max)| {
            area.assign(&divide_row(row, row.sum()));
            max.assign(&divide_row(row, row[reference_index]));
        });
    Ok(NormalizedEigenfunctions {
        sign_corrected,
        area_normalized,
        max_normalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn modes() -> nd::Array2<f64> {
        nd::Array2::from_shape_fn((5, 50), |(i, j)| {
            let x = j as f64 / 49.0;
            let amp = if i % 2 == 0 { 1.0 } else { -2.5 };
            amp * (i as f64 + 1.0) * (-(x - 0.3).powi(2) / 0.01).exp()
        })
    }

    #[test]
    fn reference_point_is_one() {
        let k = 15;
        let n = normalize(&modes(), k).unwrap();
        n.max_normalized.column(k).iter()
            .for_each(|v| assert_eq!(*v, 1.0));
        n.sign_corrected.column(k).iter()
            .for_each(|v| assert!(*v > 0.0));
    }

    #[test]
    fn area_sums_to_one() {
        let n = normalize(&modes(), 15).unwrap();
        n.area_normalized.outer_iter()
            .for_each(|row| {
                assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
            });
    }

    #[test]
    fn zero_reference_degenerates_to_nan() {
        let psi = nd::array![[0.0, 1.0, 2.0], [1.0, -1.0, 0.0]];
        let n = normalize(&psi, 0).unwrap();
        // sign(0) = 0 zeroes the whole row
        assert!(n.sign_corrected.row(0).iter().all(|v| *v == 0.0));
        assert!(n.area_normalized.row(0).iter().all(|v| v.is_nan()));
        assert!(n.max_normalized.row(0).iter().all(|v| v.is_nan()));
        // zero sum, nonzero reference
        assert!(n.area_normalized.row(1).iter().all(|v| v.is_nan()));
        assert_eq!(n.max_normalized.row(1), nd::array![1.0, -1.0, 0.0]);
    }

    #[test]
    fn rejects_out_of_bounds_reference() {
        assert!(normalize(&modes(), 50).is_err());
    }
}
