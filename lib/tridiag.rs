//! Sparse storage and elementary algorithms for real symmetric tridiagonal
//! matrices.
//!
//! Every operator in the eigenproblem (curvature, eigen-operator, mass matrix)
//! has this structure, so an `nx × nx` matrix costs `O(nx)` memory and every
//! product, factorization or inertia count costs `O(nx)` time.

use ndarray as nd;
use crate::{ Arr1, error::LengthError };

/// Real symmetric tridiagonal matrix.
///
/// `diag` holds the `n` main-diagonal elements and `off` the `n - 1` elements
/// of the first sub-/super-diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct SymTridiagonal {
    diag: nd::Array1<f64>,
    off: nd::Array1<f64>,
}

impl SymTridiagonal {
    /// Create a new matrix from its diagonals.
    ///
    /// Fails if `off` does not have exactly one fewer element than `diag`.
    pub fn new(diag: nd::Array1<f64>, off: nd::Array1<f64>)
        -> Result<Self, LengthError>
    {
        if diag.is_empty() || off.len() + 1 != diag.len() {
            return Err(LengthError(diag.len(), off.len()));
        }
        Ok(Self { diag, off })
    }

    /// Create a diagonal matrix.
    ///
    /// *Panics if `diag` is empty*.
    pub fn from_diag(diag: nd::Array1<f64>) -> Self {
        let n = diag.len();
        Self { diag, off: nd::Array1::zeros(n - 1) }
    }

    /// Create a matrix with constant diagonal `d` and off-diagonal `e`.
    ///
    /// *Panics if `n == 0`*.
    pub fn toeplitz(n: usize, d: f64, e: f64) -> Self {
        Self {
            diag: nd::Array1::from_elem(n, d),
            off: nd::Array1::from_elem(n - 1, e),
        }
    }

    /// `n × n` identity.
    ///
    /// *Panics if `n == 0`*.
    pub fn identity(n: usize) -> Self {
        Self::from_diag(nd::Array1::ones(n))
    }

    /// Get a reference to the main diagonal.
    pub fn diag(&self) -> &nd::Array1<f64> { &self.diag }

    /// Get a reference to the off-diagonal.
    pub fn off(&self) -> &nd::Array1<f64> { &self.off }

    /// Number of rows (and columns).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.diag.len() }

    /// Compute the product `self · x`.
    ///
    /// *Panics if `x` has the wrong length*.
    pub fn matvec<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.len();
        let mut y: nd::Array1<f64> = &self.diag * x;
        for i in 0..n - 1 {
            y[i] += self.off[i] * x[i + 1];
            y[i + 1] += self.off[i] * x[i];
        }
        y
    }

    /// Return `a · self`.
    pub fn scaled(&self, a: f64) -> Self {
        Self { diag: &self.diag * a, off: &self.off * a }
    }

    /// Return `self + other`.
    pub fn add(&self, other: &Self) -> Result<Self, LengthError> {
        LengthError::check(&self.diag, &other.diag)?;
        Ok(Self { diag: &self.diag + &other.diag, off: &self.off + &other.off })
    }

    /// Return `self + diag(d)`.
    pub fn add_diag<S>(&self, d: &Arr1<S>) -> Result<Self, LengthError>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check(&self.diag, d)?;
        Ok(Self { diag: &self.diag + d, off: self.off.clone() })
    }

    /// Return the shifted pencil `self - sigma · m`.
    ///
    /// *Panics if `m` has a different size*.
    pub fn pencil(&self, m: &Self, sigma: f64) -> Self {
        Self {
            diag: &self.diag - &(&m.diag * sigma),
            off: &self.off - &(&m.off * sigma),
        }
    }

    /// Gershgorin bounds `(lo, hi)` enclosing the spectrum.
    pub fn gershgorin(&self) -> (f64, f64) {
        let n = self.len();
        (0..n)
            .map(|i| {
                let left = if i > 0 { self.off[i - 1].abs() } else { 0.0 };
                let right = if i + 1 < n { self.off[i].abs() } else { 0.0 };
                (self.diag[i] - left - right, self.diag[i] + left + right)
            })
            .fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), (l, h)| (lo.min(l), hi.max(h)),
            )
    }

    /// Infinity norm (maximum absolute row sum).
    pub fn inf_norm(&self) -> f64 {
        let (lo, hi) = self.gershgorin();
        lo.abs().max(hi.abs())
    }

    /// Expand to a dense matrix.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let n = self.len();
        let mut a: nd::Array2<f64> = nd::Array2::from_diag(&self.diag);
        a.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().assign(&self.off);
        a.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().assign(&self.off);
        a
    }

    /// Count the negative eigenvalues of `self` from the signs of the pivots
    /// in its LDLᵀ factorization (Sylvester's law of inertia).
    ///
    /// Applied to a pencil `A - σ M` with `M` positive-definite, this is the
    /// number of generalized eigenvalues of `(A, M)` strictly below `σ`.
    pub fn negative_count(&self) -> usize {
        let pivmin = f64::MIN_POSITIVE
            * self.off.iter().fold(1.0_f64, |acc, e| acc.max(e * e));
        let mut count: usize = 0;
        let mut q = self.diag[0];
        if q.abs() <= pivmin { q = -pivmin; }
        if q < 0.0 { count += 1; }
        for (&d, &e) in self.diag.iter().skip(1).zip(&self.off) {
            q = d - e * e / q;
            if q.abs() <= pivmin { q = -pivmin; }
            if q < 0.0 { count += 1; }
        }
        count
    }

    /// Solve `self · x = b` by an unpivoted LDLᵀ factorization.
    ///
    /// Pivots smaller in magnitude than `ε ‖self‖∞` are replaced by that
    /// value, so the solve never divides by zero; this is the regime of
    /// shift-invert iteration with a shift at an eigenvalue, where the result
    /// is dominated by the corresponding eigenvector anyway.
    ///
    /// *Panics if `b` has the wrong length*.
    pub fn solve<S>(&self, b: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.len();
        let pivmin = (f64::EPSILON * self.inf_norm()).max(f64::MIN_POSITIVE);
        let guard = |q: f64| {
            if q.abs() < pivmin { if q < 0.0 { -pivmin } else { pivmin } }
            else { q }
        };
        let mut q: nd::Array1<f64> = nd::Array1::zeros(n);
        let mut y: nd::Array1<f64> = b.to_owned();
        q[0] = guard(self.diag[0]);
        for i in 1..n {
            let l = self.off[i - 1] / q[i - 1];
            q[i] = guard(self.diag[i] - l * self.off[i - 1]);
            y[i] -= l * y[i - 1];
        }
        let mut x: nd::Array1<f64> = nd::Array1::zeros(n);
        x[n - 1] = y[n - 1] / q[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = (y[i] - self.off[i] * x[i + 1]) / q[i];
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn laplacian(n: usize) -> SymTridiagonal {
        SymTridiagonal::toeplitz(n, 2.0, -1.0)
    }

    #[test]
    fn rejects_mismatched_diagonals() {
        let empty = || nd::Array1::<f64>::zeros(0);
        assert!(SymTridiagonal::new(nd::array![1.0, 2.0], empty()).is_err());
        assert!(SymTridiagonal::new(empty(), empty()).is_err());
    }

    #[test]
    fn matvec_matches_dense() {
        let a = SymTridiagonal::new(
            nd::array![1.0, 2.0, 3.0, 4.0],
            nd::array![0.5, -1.0, 2.0],
        ).unwrap();
        let x = nd::array![1.0, -2.0, 0.5, 3.0];
        let sparse = a.matvec(&x);
        let dense = a.to_dense().dot(&x);
        for (s, d) in sparse.iter().zip(&dense) {
            assert_abs_diff_eq!(s, d, epsilon = 1e-14);
        }
    }

    #[test]
    fn solve_inverts_matvec() {
        let a = laplacian(50).add_diag(&nd::Array1::from_elem(50, 0.1)).unwrap();
        let x: nd::Array1<f64> = (0..50).map(|k| (k as f64 * 0.3).sin()).collect();
        let b = a.matvec(&x);
        let x2 = a.solve(&b);
        for (u, v) in x.iter().zip(&x2) {
            assert_abs_diff_eq!(u, v, epsilon = 1e-10);
        }
    }

    #[test]
    fn negative_count_brackets_laplacian_spectrum() {
        // eigenvalues of tridiag(-1, 2, -1) are 2 - 2 cos(kπ/(n + 1))
        let n = 20;
        let a = laplacian(n);
        let id = SymTridiagonal::identity(n);
        let ev = |k: usize| {
            2.0 - 2.0 * (k as f64 * std::f64::consts::PI / (n + 1) as f64).cos()
        };
        assert_eq!(a.pencil(&id, 0.0).negative_count(), 0);
        assert_eq!(a.pencil(&id, 4.0).negative_count(), n);
        for k in 1..n {
            let mid = 0.5 * (ev(k) + ev(k + 1));
            assert_eq!(a.pencil(&id, mid).negative_count(), k);
        }
    }

    #[test]
    fn gershgorin_encloses_spectrum() {
        let (lo, hi) = laplacian(10).gershgorin();
        assert_eq!((lo, hi), (0.0, 4.0));
        assert_eq!(laplacian(10).inf_norm(), 4.0);
    }
}
