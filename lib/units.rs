//! Small unit conversions.
//!
//! All quantities are in SI (meters/seconds) units.

use std::f64::consts::TAU;

/// seconds per (solar) day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Vertical wavenumber `2π/λ` (rad m^-1) of a vertical wavelength `λ` (m).
pub fn wavenumber(lambda: f64) -> f64 { TAU / lambda }

/// Convert a rate (s^-1) to an e-folding time (days).
///
/// Zero maps to `+∞` and NaN to NaN; this never panics.
pub fn rate_to_days(rate: f64) -> f64 {
    (rate * SECONDS_PER_DAY).recip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wavenumber_of_wavelength() {
        assert_relative_eq!(wavenumber(TAU), 1.0);
        assert_relative_eq!(wavenumber(100.0), 0.06283185307179587);
    }

    #[test]
    fn rate_to_days_edge_cases() {
        assert_relative_eq!(rate_to_days(1.0 / SECONDS_PER_DAY), 1.0);
        assert_eq!(rate_to_days(0.0), f64::INFINITY);
        assert!(rate_to_days(f64::NAN).is_nan());
    }
}
