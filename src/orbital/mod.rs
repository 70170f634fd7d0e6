//! Orbital quantities derived from raw orbital elements
//!
//! These are descriptive values used to pace a visualization. The AU distance
//! is computed from whatever semimajor axis the body currently holds, which is
//! a scaled value after distance scaling, so Kepler's third law does not hold
//! exactly for the resulting harmonic frequency.

use crate::constants::KM_TO_AU;

/// Derive the semi-minor axis of an ellipse: `a * sqrt(1 - e^2)`
///
/// Returns NaN when `|eccentricity| > 1` and zero when it equals one; callers
/// treat a non-positive or non-finite result as a data-quality failure.
pub fn derive_semiminor_axis(semimajor_axis: f64, eccentricity: f64) -> f64 {
    semimajor_axis * (1.0 - eccentricity * eccentricity).sqrt()
}

/// Check that an eccentricity describes a closed orbit
pub fn is_bound_eccentricity(eccentricity: f64) -> bool {
    eccentricity.is_finite() && eccentricity.abs() < 1.0
}

/// Distance from the primary in AU, from a semimajor axis in km
pub fn distance_from_primary_au(semimajor_axis_km: f64) -> f64 {
    semimajor_axis_km * KM_TO_AU
}

/// Kepler-ratio proxy: `distance_au^3 / orbital_period_days^2`
///
/// A zero orbital period yields an infinite or NaN value; the caller decides
/// whether that is meaningful.
pub fn harmonic_frequency(distance_au: f64, orbital_period_days: f64) -> f64 {
    distance_au.powi(3) / orbital_period_days.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(149_600_000.0, 0.0167)]
    #[case(227_939_200.0, 0.0934)]
    #[case(384_400.0, 0.0549)]
    #[case(1.0, 0.999)]
    fn test_semiminor_not_longer_than_semimajor(#[case] a: f64, #[case] e: f64) {
        let b = derive_semiminor_axis(a, e);
        assert!(b < a, "b={} should be shorter than a={}", b, a);
        assert!(b > 0.0);
    }

    #[test]
    fn test_semiminor_circular_orbit() {
        assert_eq!(derive_semiminor_axis(149_600_000.0, 0.0), 149_600_000.0);
    }

    #[test]
    fn test_semiminor_earth() {
        let b = derive_semiminor_axis(149_600_000.0, 0.0167);
        assert_eq!(b.round(), 149_579_138.0);
    }

    #[test]
    fn test_semiminor_unbound_is_nan() {
        assert!(derive_semiminor_axis(1.0, 1.5).is_nan());
        assert!(!is_bound_eccentricity(1.0));
        assert!(!is_bound_eccentricity(f64::NAN));
        assert!(is_bound_eccentricity(-0.5));
    }

    #[test]
    fn test_distance_and_harmonic() {
        let au = distance_from_primary_au(149_600_000.0);
        assert_relative_eq!(au, 1.000076, epsilon = 1e-6);

        let freq = harmonic_frequency(au, 365.25);
        assert_relative_eq!(freq, au.powi(3) / (365.25 * 365.25), epsilon = 1e-15);
    }
}
