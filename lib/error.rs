//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    pub(crate) fn check_index(len: usize, index: usize) -> Result<(), Self> {
        (index < len).then_some(()).ok_or(Self(len, index))
    }
}

/// Returned when a physical or numerical parameter is non-physical or would
/// produce a structurally degenerate problem.
///
/// Every variant is detected eagerly, before any eigenproblem is solved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the grid spacing is non-positive or non-finite.
    #[error("grid spacing must be positive and finite; got {0}")]
    BadSpacing(f64),

    /// Returned when the domain width is non-positive or non-finite.
    #[error("domain width must be positive and finite; got {0}")]
    BadWidth(f64),

    /// Returned when the domain holds fewer than 3 grid points.
    #[error("grid must contain at least 3 points; got {0}")]
    GridTooSmall(usize),

    /// Returned when a wavelength is non-positive or non-finite.
    #[error("wavelengths must be positive and finite; got {0}")]
    BadWavelength(f64),

    /// Returned when no wavelengths are given.
    #[error("wavelength array must not be empty")]
    NoWavelengths,

    /// Returned when a vertical wavenumber is zero or non-finite.
    #[error("vertical wavenumber must be non-zero and finite; got {0}")]
    BadWavenumber(f64),

    /// Returned when a viscosity is negative or non-finite.
    #[error("viscosities must be non-negative and finite; got {0}")]
    BadViscosity(f64),

    /// Returned when the jet width is non-positive or non-finite.
    #[error("jet width must be positive and finite; got {0}")]
    BadJetWidth(f64),

    /// Returned when a physical constant is non-finite.
    #[error("parameter `{0}` must be finite; got {1}")]
    NonFinite(&'static str, f64),

    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when the imaginary-residual tolerance is negative or NaN.
    #[error("imaginary residual tolerance must be non-negative; got {0}")]
    BadImagTol(f64),

    /// Returned when sampled fields do not match the grid.
    #[error("sampled field does not match grid: {0}")]
    Shape(#[from] LengthError),
}

impl ConfigError {
    pub(crate) fn check_spacing(dx: f64) -> Result<(), Self> {
        (dx > 0.0 && dx.is_finite()).then_some(()).ok_or(Self::BadSpacing(dx))
    }

    pub(crate) fn check_width(lx: f64) -> Result<(), Self> {
        (lx > 0.0 && lx.is_finite()).then_some(()).ok_or(Self::BadWidth(lx))
    }

    pub(crate) fn check_nx(nx: usize) -> Result<(), Self> {
        (nx >= 3).then_some(()).ok_or(Self::GridTooSmall(nx))
    }

    pub(crate) fn check_wavelength(lambda: f64) -> Result<(), Self> {
        (lambda > 0.0 && lambda.is_finite()).then_some(())
            .ok_or(Self::BadWavelength(lambda))
    }

    pub(crate) fn check_wavenumber(m: f64) -> Result<(), Self> {
        (m != 0.0 && m.is_finite()).then_some(()).ok_or(Self::BadWavenumber(m))
    }

    pub(crate) fn check_viscosity(visc: f64) -> Result<(), Self> {
        (visc >= 0.0 && visc.is_finite()).then_some(())
            .ok_or(Self::BadViscosity(visc))
    }

    pub(crate) fn check_jet_width(delta: f64) -> Result<(), Self> {
        (delta > 0.0 && delta.is_finite()).then_some(())
            .ok_or(Self::BadJetWidth(delta))
    }

    pub(crate) fn check_finite(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        val.is_finite().then_some(()).ok_or(Self::NonFinite(name, val))
    }

    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_imag_tol(tol: f64) -> Result<(), Self> {
        (tol >= 0.0).then_some(()).ok_or(Self::BadImagTol(tol))
    }
}

/// Stage of an iterative eigensolve, for error reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Expansion of the initial eigenvalue bracket.
    Bracket,
    /// Sturm-sequence bisection on the eigenvalue.
    Bisection,
    /// Inverse iteration on the eigenvector.
    InverseIteration,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bracket => write!(f, "bracket"),
            Self::Bisection => write!(f, "bisection"),
            Self::InverseIteration => write!(f, "inverse iteration"),
        }
    }
}

/// Returned from eigensolver functions in [`solve`][crate::solve].
#[derive(Debug, Error)]
pub enum SolveError {
    /// Returned when an iterative stage fails to converge within `maxiters`
    /// iterations.
    #[error("{stage} failed to converge within {maxiters} iterations")]
    NoConvergence { stage: Stage, maxiters: usize },

    /// Returned when a dense decomposition produces no eigenvalues.
    #[error("eigen-decomposition returned an empty spectrum")]
    EmptySpectrum,

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

/// Returned from functions in [`minimize`][crate::minimize].
#[derive(Debug, Error)]
pub enum MinimizeError {
    /// Returned when the lower bound is not strictly below the upper bound.
    #[error("bounds must satisfy lo < hi; got ({0}, {1})")]
    BadBounds(f64, f64),

    /// Returned when a non-positive `xtol` value is encountered.
    #[error("xtol must be greater than 0; got {0}")]
    BadTolerance(f64),

    /// Returned when the search fails to converge within `maxiters`
    /// iterations.
    #[error("bounded minimization failed to converge within {0} iterations")]
    NoConvergence(usize),
}

/// Crate-level error returned by drivers that combine configuration, grid
/// construction and eigensolves.
#[derive(Debug, Error)]
pub enum StabError {
    /// [`ConfigError`]
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Returned when the eigensolver fails for a particular wavelength.
    #[error("eigensolver did not converge at wavelength {lambda} m: {source}")]
    SolverDidNotConverge {
        lambda: f64,
        #[source]
        source: SolveError,
    },

    /// [`MinimizeError`]
    #[error("minimization error: {0}")]
    Minimize(#[from] MinimizeError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Non-fatal diagnostic raised when the imaginary part of an eigenfunction
/// discarded by the sweep is not negligible relative to its real part.
///
/// This is never returned as an `Err`; it is logged and collected in
/// [`SweepResult::warnings`][crate::sweep::SweepResult::warnings].
#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "discarded imaginary residual at wavelength {lambda} m is {ratio:.3e} of \
    the real part (tolerance {tolerance:.1e})"
)]
pub struct PrecisionWarning {
    /// Wavelength (m).
    pub lambda: f64,
    /// max |Im ψ| / max |Re ψ|.
    pub ratio: f64,
    /// Configured tolerance.
    pub tolerance: f64,
}
