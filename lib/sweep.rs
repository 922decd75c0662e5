//! Driver for the least-stable eigenmode over an array of vertical
//! wavelengths.
//!
//! Each wavelength is an independent eigenproblem sharing only immutable
//! inputs (grid, vorticity, physical constants), so the sweep is a parallel
//! map over wavelengths whose output is ordered by input index.

use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::prelude::*;
use crate::{
    Arr1,
    assemble::assemble,
    config::Config,
    error::{ PrecisionWarning, StabError },
    grid::Grid,
    jet::Jet,
    solve::{ solve_least_stable, Eigenpair },
    tridiag::SymTridiagonal,
    units,
    utils::imag_residual_ratio,
};

/// Output of [`Sweep::run`].
///
/// All arrays along the wavelength axis are ordered as the input wavelengths.
#[derive(Clone, Debug)]
pub struct SweepResult {
    /// Grid coordinates (m).
    pub x: nd::Array1<f64>,
    /// Vertical wavelengths (m).
    pub lambda: nd::Array1<f64>,
    /// Squared vertical wavenumbers `(2π/λ)²` (m^-2).
    pub m2: nd::Array1<f64>,
    /// Least-stable eigenvalue `ω̂²` for each wavelength (s^-2).
    pub eigen_value: nd::Array1<C64>,
    /// Real part of the unnormalized eigenfunction, indexed by `(λ, x)`.
    pub psi: nd::Array2<f64>,
    /// Wavelengths whose discarded imaginary part exceeded the configured
    /// tolerance.
    pub warnings: Vec<PrecisionWarning>,
}

/// Keep the real part of the eigenvector `vector` found at wavelength
/// `lambda`, raising a [`PrecisionWarning`] if the discarded imaginary part
/// exceeds `tolerance` relative to it.
pub(crate) fn real_part_checked<S>(
    lambda: f64,
    vector: &Arr1<S>,
    tolerance: f64,
) -> (nd::Array1<f64>, Option<PrecisionWarning>)
where S: nd::Data<Elem = C64>
{
    let ratio = imag_residual_ratio(vector);
    let warning
        = (ratio > tolerance)
        .then(|| {
            let warning = PrecisionWarning { lambda, ratio, tolerance };
            log::warn!("{warning}");
            warning
        });
    (vector.mapv(|z| z.re), warning)
}

/// Prepared sweep over the wavelengths of a [`Config`].
///
/// The grid, vorticity field and curvature operator are built once at
/// construction and shared read-only by every solve.
#[derive(Clone, Debug)]
pub struct Sweep<'a> {
    config: &'a Config,
    grid: Grid,
    jet: Jet,
    zeta: nd::Array1<f64>,
    d2: SymTridiagonal,
}

impl<'a> Sweep<'a> {
    /// Validate `config` and build the shared inputs.
    ///
    /// Fails with [`StabError::InvalidConfiguration`] before any eigenproblem
    /// is solved.
    pub fn new(config: &'a Config) -> Result<Self, StabError> {
        config.validate()?;
        let grid = Grid::new(config.lx, config.dx)?;
        let jet = config.jet();
        let zeta = jet.zeta_array(grid.get_x());
        let d2 = grid.curvature();
        Ok(Self { config, grid, jet, zeta, d2 })
    }

    /// Get a reference to the grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get the jet.
    pub fn jet(&self) -> Jet { self.jet }

    /// Get a reference to the absolute vorticity sampled on the grid.
    pub fn zeta(&self) -> &nd::Array1<f64> { &self.zeta }

    /// Assemble and solve the eigenproblem for a single wavelength.
    pub fn solve_wavelength(&self, lambda: f64) -> Result<Eigenpair, StabError> {
        let m = units::wavenumber(lambda);
        let op = assemble(
            m,
            self.config.N2,
            self.config.f,
            &self.zeta,
            &self.d2,
            self.config.hydrostatic,
        )?;
        let pair
            = solve_least_stable(&op, self.config.solver.method)
            .map_err(|source| {
                log::error!("solve failed at wavelength {lambda} m: {source}");
                StabError::SolverDidNotConverge { lambda, source }
            })?;
        log::debug!(
            "wavelength {lambda} m: eigenvalue {:.6e} after {} iterations",
            pair.value, pair.iters,
        );
        Ok(pair)
    }

    /// Solve every wavelength in the configuration.
    ///
    /// Any solver failure aborts the whole sweep, so a returned result always
    /// covers every wavelength.
    pub fn run(&self) -> Result<SweepResult, StabError> {
        let lambda = self.config.lambda.clone();
        log::info!(
            "sweeping {} wavelengths on {} grid points ({}, {})",
            lambda.len(),
            self.grid.len(),
            if self.config.hydrostatic { "hydrostatic" } else { "non-hydrostatic" },
            if self.config.solver.parallel { "parallel" } else { "sequential" },
        );
        let lambda_vec = lambda.to_vec();
        let pairs: Vec<Eigenpair>
            = if self.config.solver.parallel {
                lambda_vec.par_iter()
                    .map(|&l| self.solve_wavelength(l))
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                lambda_vec.iter()
                    .map(|&l| self.solve_wavelength(l))
                    .collect::<Result<Vec<_>, _>>()?
            };

        let m2 = lambda.mapv(|l| units::wavenumber(l).powi(2));
        let eigen_value: nd::Array1<C64>
            = pairs.iter().map(|pair| pair.value).collect();
        let mut psi: nd::Array2<f64>
            = nd::Array2::zeros((lambda.len(), self.grid.len()));
        let mut warnings: Vec<PrecisionWarning> = Vec::new();
        let tolerance = self.config.solver.imag_tol;
        for ((&l, pair), mut row)
            in lambda.iter().zip(&pairs).zip(psi.outer_iter_mut())
        {
            let (re, warning) = real_part_checked(l, &pair.vector, tolerance);
            row.assign(&re);
            warnings.extend(warning);
        }
        log::info!(
            "sweep finished with {} precision warning(s)", warnings.len());
        Ok(SweepResult {
            x: self.grid.get_x().clone(),
            lambda,
            m2,
            eigen_value,
            psi,
            warnings,
        })
    }

    /// Index of the grid point nearest to the vorticity minimum, located over
    /// the whole domain to a tenth of the grid spacing.
    pub fn reference_index(&self) -> Result<usize, StabError> {
        let min = self.jet.locate_vorticity_minimum(
            (0.0, self.grid.width()), self.grid.get_dx() / 10.0)?;
        Ok(self.grid.nearest_index(min.x))
    }
}
