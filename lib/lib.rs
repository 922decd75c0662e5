#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for the linear stability
//! analysis of a stratified, rotating jet subject to symmetric instability.
//!
//! The horizontal structure of an overturning mode with vertical wavenumber
//! *m* satisfies a second-order boundary value problem across the channel,
//! which is discretized on a uniform grid and solved as a (generalized)
//! eigenvalue problem for the least-stable mode at each vertical wavelength.
//! Growth rates are then derived for a range of vertical viscosities, and the
//! horizontal eigenfunctions are normalized for presentation.
//!
//! Provides implementations for the following numerical routines:
//! - Operators:
//!     - Truncated three-point curvature operator on a uniform grid
//!     - Hydrostatic and non-hydrostatic eigen-operator assembly
//! - Eigensolvers:
//!     - Sturm-sequence bisection with shift-invert (inverse) iteration
//!     - Dense general eigen-decomposition (LAPACK)
//! - Post-processing:
//!     - Viscous growth rates and most-unstable wavelength extraction
//!     - Sign-corrected, area- and max-normalized eigenfunctions
//!     - Brent's bounded minimization for the vorticity minimum
//!
//! ```no_run
//! use symstab::{ config::Config, sweep::Sweep, growth, normalize };
//!
//! let config = Config::default();
//! let sweep = Sweep::new(&config).unwrap();
//! let result = sweep.run().unwrap();
//! let field = growth::compute_growth_rates(
//!     &result.eigen_value,
//!     &result.lambda,
//!     &result.m2,
//!     &config.viscosity,
//!     config.f,
//! ).unwrap();
//! let summary = growth::extract_unstable_mode(&field);
//! let k = sweep.reference_index().unwrap();
//! let eigfns = normalize::normalize(&result.psi, k).unwrap();
//! println!("{:?} {:?}", summary.lambda_star, eigfns.max_normalized.shape());
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod config;
pub mod units;
pub mod jet;
pub mod minimize;
pub mod grid;
pub mod tridiag;
pub mod assemble;
pub mod solve;
pub mod sweep;
pub mod growth;
pub mod normalize;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-12;
pub(crate) const DEF_MAXITERS: usize = 1000;
pub(crate) const DEF_IMAG_TOL: f64 = 1e-6;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
