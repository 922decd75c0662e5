//! Uniform horizontal grid and the curvature (second-derivative) operator.

use ndarray as nd;
use crate::{
    error::ConfigError,
    tridiag::SymTridiagonal,
};

/// Ordered horizontal coordinates `x[i] = i dx` for `i ∊ {0, ..., nx - 1}`.
///
/// Immutable once built; the domain width is `nx dx`.
#[derive(Clone, Debug)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
    // array size
    nx: usize,
}

impl Grid {
    /// Build a grid covering `[0, lx)` with spacing `dx`, so that
    /// `nx = floor(lx / dx)`.
    ///
    /// Fails with an [`InvalidConfiguration`][crate::error::StabError] cause if
    /// either argument is non-positive or non-finite, or if `nx < 3`.
    pub fn new(lx: f64, dx: f64) -> Result<Self, ConfigError> {
        ConfigError::check_width(lx)?;
        ConfigError::check_spacing(dx)?;
        let nx = (lx / dx).floor() as usize;
        ConfigError::check_nx(nx)?;
        let x: nd::Array1<f64> = (0..nx).map(|i| i as f64 * dx).collect();
        Ok(Self { x, dx, nx })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.nx }

    /// Domain width `nx dx`.
    pub fn width(&self) -> f64 { self.nx as f64 * self.dx }

    /// Index of the grid point nearest to `x`, clamped to the grid.
    pub fn nearest_index(&self, x: f64) -> usize {
        let k = (x / self.dx).round();
        if k <= 0.0 || k.is_nan() {
            0
        } else {
            (k as usize).min(self.nx - 1)
        }
    }

    /// The curvature operator for this grid; see [`curvature_operator`].
    pub fn curvature(&self) -> SymTridiagonal {
        curvature_operator(self.nx, self.dx)
    }
}

/// Build the `nx × nx` discrete second-derivative operator
/// `[1, -2, 1] / dx²`.
///
/// Neighbors beyond either end of the grid are simply dropped, so the first
/// and last rows read `[-2, 1] / dx²` and `[1, -2] / dx²`; this is equivalent
/// to a streamfunction vanishing one grid step outside the domain.
///
/// *Panics if `nx == 0`*.
pub fn curvature_operator(nx: usize, dx: f64) -> SymTridiagonal {
    let ondx2 = dx.powi(2).recip();
    SymTridiagonal::toeplitz(nx, -2.0 * ondx2, ondx2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };

    #[test]
    fn grid_points_and_size() {
        let grid = Grid::new(400e3, 1e2).unwrap();
        assert_eq!(grid.len(), 4000);
        assert_eq!(grid.get_x()[0], 0.0);
        assert_relative_eq!(grid.get_x()[3999], 399_900.0);
        assert_relative_eq!(grid.width(), 400e3);
        // non-integer ratios are floored
        assert_eq!(Grid::new(1050.0, 100.0).unwrap().len(), 10);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(matches!(
            Grid::new(200.0, 100.0),
            Err(ConfigError::GridTooSmall(2))
        ));
        assert!(matches!(Grid::new(1e3, 0.0), Err(ConfigError::BadSpacing(_))));
        assert!(matches!(Grid::new(-1e3, 1.0), Err(ConfigError::BadWidth(_))));
    }

    #[test]
    fn nearest_index_clamps() {
        let grid = Grid::new(1e3, 1e2).unwrap();
        assert_eq!(grid.nearest_index(-50.0), 0);
        assert_eq!(grid.nearest_index(349.0), 3);
        assert_eq!(grid.nearest_index(351.0), 4);
        assert_eq!(grid.nearest_index(1e6), 9);
    }

    #[test]
    fn curvature_of_quadratic_is_two() {
        let grid = Grid::new(10e3, 50.0).unwrap();
        let d2 = grid.curvature();
        let y = grid.get_x().mapv(|x| x * x);
        let d2y = d2.matvec(&y);
        let n = grid.len();
        d2y.iter().skip(1).take(n - 2)
            .for_each(|v| assert_abs_diff_eq!(*v, 2.0, epsilon = 1e-6));
        // truncated boundary rows see a missing neighbor
        assert!((d2y[0] - 2.0).abs() > 0.5);
        assert!((d2y[n - 1] - 2.0).abs() > 1.0);
    }

    #[test]
    fn curvature_is_symmetric_with_truncated_rows() {
        let d2 = curvature_operator(5, 2.0).to_dense();
        assert_eq!(d2, d2.t());
        assert_eq!(d2[[0, 0]], -0.5);
        assert_eq!(d2[[0, 1]], 0.25);
        assert_eq!(d2.row(0).sum(), -0.25);
        assert_eq!(d2.row(2).sum(), 0.0);
    }
}
