//! Run configuration.
//!
//! A [`Config`] is an explicit, immutable record of every physical and
//! numerical parameter of a run. Components borrow it (or the parts they need)
//! at construction; nothing in this crate holds process-wide state.

use ndarray as nd;
use crate::{
    error::ConfigError,
    jet::Jet,
    solve::Method,
    DEF_IMAG_TOL,
};

/// Numerical parameters for the eigensolves in a sweep.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Eigensolver method.
    pub method: Method,
    /// Largest tolerated ratio of discarded imaginary to retained real part in
    /// an eigenfunction before a
    /// [`PrecisionWarning`][crate::error::PrecisionWarning] is raised
    /// (default: `1e-6`).
    pub imag_tol: f64,
    /// Solve wavelengths on the rayon thread pool rather than sequentially.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            imag_tol: DEF_IMAG_TOL,
            parallel: true,
        }
    }
}

impl SolverConfig {
    /// Check that all tolerances and iteration caps are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_imag_tol(self.imag_tol)?;
        if let Method::Bisection { epsilon, maxiters } = self.method {
            ConfigError::check_epsilon(epsilon)?;
            ConfigError::check_maxiters(maxiters)?;
        }
        Ok(())
    }
}

/// All inputs to a run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Drop the vertical acceleration, making the eigenproblem standard rather
    /// than generalized.
    pub hydrostatic: bool,
    /// Domain width (m).
    pub lx: f64,
    /// Grid spacing (m).
    pub dx: f64,
    /// Squared buoyancy frequency (s^-2).
    pub N2: f64,
    /// Planetary vorticity (s^-1).
    pub f: f64,
    /// Reference vertical viscosity (m^2 s^-1).
    pub a_r: f64,
    /// Jet centre (m).
    pub x_mid: f64,
    /// Jet half-width (m).
    pub delta_b: f64,
    /// Jet peak velocity (m s^-1).
    pub v0: f64,
    /// Vertical wavelengths to sweep (m).
    pub lambda: nd::Array1<f64>,
    /// Vertical viscosities for the growth-rate surface (m^2 s^-1).
    pub viscosity: nd::Array1<f64>,
    /// Eigensolver parameters.
    pub solver: SolverConfig,
}

impl Default for Config {
    /// Non-hydrostatic jet with `Lx = 400 km`, `dx = 100 m`, `f = 1.01e-5`,
    /// `N² = 2.5e-5`, `x_mid = 40 km`, `δ = 30 km`, `V0 = 0.87 m/s`, 60
    /// wavelengths from 10 m to 600 m and 40 log-spaced viscosities from
    /// `5e-7` to `1e-2`.
    fn default() -> Self {
        Self {
            hydrostatic: false,
            lx: 400e3,
            dx: 1e2,
            N2: 2.5e-5,
            f: 1.01e-5,
            a_r: 4e-4,
            x_mid: 40e3,
            delta_b: 30e3,
            v0: 0.87,
            lambda: nd::Array1::linspace(10.0, 600.0, 60),
            viscosity: nd::Array1::geomspace(5e-7, 1e-2, 40)
                .unwrap_or_else(|| nd::array![5e-7, 1e-2]),
            solver: SolverConfig::default(),
        }
    }
}

impl Config {
    /// Number of grid points implied by the domain width and spacing,
    /// `floor(Lx / dx)`.
    pub fn nx(&self) -> usize { (self.lx / self.dx).floor() as usize }

    /// Jet described by this configuration.
    pub fn jet(&self) -> Jet {
        Jet { f: self.f, v0: self.v0, x_mid: self.x_mid, delta_b: self.delta_b }
    }

    /// Return a copy with a different set of wavelengths.
    pub fn with_lambda(&self, lambda: nd::Array1<f64>) -> Self {
        Self { lambda, ..self.clone() }
    }

    /// Return a copy with a different set of viscosities.
    pub fn with_viscosity(&self, viscosity: nd::Array1<f64>) -> Self {
        Self { viscosity, ..self.clone() }
    }

    /// Perform every eager configuration check.
    ///
    /// This is called by [`Sweep::new`][crate::sweep::Sweep::new], so that an
    /// invalid configuration aborts a run before any eigenproblem is solved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_width(self.lx)?;
        ConfigError::check_spacing(self.dx)?;
        ConfigError::check_nx(self.nx())?;
        ConfigError::check_finite("N2", self.N2)?;
        ConfigError::check_finite("f", self.f)?;
        ConfigError::check_finite("x_mid", self.x_mid)?;
        ConfigError::check_finite("v0", self.v0)?;
        ConfigError::check_jet_width(self.delta_b)?;
        ConfigError::check_viscosity(self.a_r)?;
        if self.lambda.is_empty() { return Err(ConfigError::NoWavelengths); }
        self.lambda.iter()
            .try_for_each(|&l| ConfigError::check_wavelength(l))?;
        self.viscosity.iter()
            .try_for_each(|&a| ConfigError::check_viscosity(a))?;
        self.solver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nx(), 4000);
        assert_eq!(config.lambda.len(), 60);
        assert_eq!(config.viscosity.len(), 40);
    }

    #[test]
    fn rejects_small_grid() {
        let config = Config { lx: 250.0, ..Config::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall(2))
        ));
    }

    #[test]
    fn rejects_bad_wavelength() {
        let config = Config::default().with_lambda(nd::array![100.0, 0.0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadWavelength(_))
        ));
        let config = Config::default().with_lambda(nd::Array1::zeros(0));
        assert!(matches!(config.validate(), Err(ConfigError::NoWavelengths)));
    }

    #[test]
    fn rejects_negative_viscosity() {
        let config = Config::default().with_viscosity(nd::array![1e-4, -1e-4]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadViscosity(_))
        ));
    }

    #[test]
    fn rejects_bad_solver() {
        let mut config = Config::default();
        config.solver.method = Method::Bisection { epsilon: 0.0, maxiters: 10 };
        assert!(matches!(config.validate(), Err(ConfigError::BadEpsilon(_))));
        config.solver.method = Method::Bisection { epsilon: 1e-9, maxiters: 0 };
        assert!(matches!(config.validate(), Err(ConfigError::BadMaxiters(0))));
    }
}
