//! Unit scaling primitives
//!
//! Astronomical magnitudes (masses near 10^30 kg, distances near 10^9 km) are
//! compressed for visualization by dividing by a power of ten. The functions
//! here are pure and assume finite inputs.

use crate::constants::{LEGACY_MAX_SAFE_VALUE, OVERFLOW_MARGIN};

/// Scale a value down by a power of ten: `value / 10^exponent`
#[inline]
pub fn scale_down(value: f64, exponent: f64) -> f64 {
    value / 10f64.powf(exponent)
}

/// Track a display exponent after scaling: `original_exponent - scale_exponent`
#[inline]
pub fn rescale_exponent(original_exponent: f64, scale_exponent: f64) -> f64 {
    original_exponent - scale_exponent
}

/// Mantissa scaled by a replacement exponent: `mantissa * 10^exponent`
#[inline]
pub fn scale_mantissa(mantissa: f64, exponent: f64) -> f64 {
    mantissa * 10f64.powf(exponent)
}

/// Keep a value under a numeric boundary
///
/// Values at or above `max_safe_value` are pulled back to
/// `max_safe_value - OVERFLOW_MARGIN`; smaller values pass through.
#[inline]
pub fn clamp_overflow(value: f64, max_safe_value: f64) -> f64 {
    if value >= max_safe_value {
        let amount_over = value - max_safe_value;
        value - amount_over - OVERFLOW_MARGIN
    } else {
        value
    }
}

/// Upper bound of the attribute type used by the downstream renderer
///
/// Scaled masses and volumes are handed to a scene layer whose custom
/// attributes are fixed-width integers; anything at or above this bound is
/// clamped before export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowBoundary {
    max_safe_value: f64,
}

impl OverflowBoundary {
    /// Create a boundary at an explicit value
    pub fn new(max_safe_value: f64) -> Self {
        Self { max_safe_value }
    }

    /// The legacy boundary, `2^32 - 1 - 100000`
    pub fn legacy() -> Self {
        Self::new(LEGACY_MAX_SAFE_VALUE)
    }

    /// Get the boundary value
    pub fn max_safe_value(&self) -> f64 {
        self.max_safe_value
    }

    /// Check whether a value would be clamped
    pub fn exceeds(&self, value: f64) -> bool {
        value >= self.max_safe_value
    }

    /// Clamp a value under this boundary, logging when a correction happens
    pub fn clamp(&self, label: &str, value: f64) -> f64 {
        if self.exceeds(value) {
            let clamped = clamp_overflow(value, self.max_safe_value);
            log::warn!(
                "{} ({}) is larger than {}, subtracting {} from value",
                label,
                value,
                self.max_safe_value,
                value - clamped
            );
            clamped
        } else {
            value
        }
    }
}

impl Default for OverflowBoundary {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::U32_MAX_F64;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_down() {
        assert_relative_eq!(scale_down(149_600_000.0, 3.0), 149_600.0);
        assert_relative_eq!(scale_down(6378.0, 0.0), 6378.0);
        assert_relative_eq!(scale_down(1000.0, -1.0), 10_000.0);
        assert_relative_eq!(scale_down(10.0, 0.5), 10.0 / 10f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rescale_exponent() {
        assert_relative_eq!(rescale_exponent(24.0, 8.5), 15.5);
        assert_relative_eq!(rescale_exponent(12.0, 0.0), 12.0);
    }

    #[test]
    fn test_scale_mantissa() {
        assert_relative_eq!(scale_mantissa(5.976, 2.0), 597.6, epsilon = 1e-9);
    }

    #[test]
    fn test_clamp_overflow_legacy_boundary() {
        let value = 2f64.powi(32) + 5000.0;
        let clamped = clamp_overflow(value, LEGACY_MAX_SAFE_VALUE);

        assert!(clamped < U32_MAX_F64);
        assert!(clamped >= U32_MAX_F64 - 100_000.0 - 100.0);
        assert_relative_eq!(clamped, LEGACY_MAX_SAFE_VALUE - OVERFLOW_MARGIN);
    }

    #[test]
    fn test_clamp_overflow_passthrough() {
        assert_eq!(clamp_overflow(42.0, LEGACY_MAX_SAFE_VALUE), 42.0);
        // At exactly the boundary the value is pulled under it
        assert_eq!(
            clamp_overflow(LEGACY_MAX_SAFE_VALUE, LEGACY_MAX_SAFE_VALUE),
            LEGACY_MAX_SAFE_VALUE - OVERFLOW_MARGIN
        );
    }

    #[test]
    fn test_boundary_configurable() {
        let boundary = OverflowBoundary::new(1_000.0);
        assert!(boundary.exceeds(1_000.0));
        assert!(!boundary.exceeds(999.0));
        assert_eq!(boundary.clamp("massRawKG", 5_000.0), 900.0);
        assert_eq!(OverflowBoundary::default().max_safe_value(), LEGACY_MAX_SAFE_VALUE);
    }
}
