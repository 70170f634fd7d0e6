//! Descriptive statistics over attribute values

/// Arithmetic mean, `None` for an empty slice
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance, `None` for an empty slice
pub(crate) fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Smallest and largest value of a non-empty slice
pub(crate) fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Round to a number of decimal places
///
/// Precisions finer than an `f64` can represent leave the value unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(f64::MAX_10_EXP as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Map `value` from `source` linearly onto `target`, rounded to `precision` places
///
/// Returns `None` when the source range is empty.
pub fn normalize_value(
    value: f64,
    source: (f64, f64),
    target: (f64, f64),
    precision: u32,
) -> Option<f64> {
    let (min, max) = source;
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        return None;
    }
    let (start, end) = target;
    Some(round_to(start + (value - min) / span * (end - start), precision))
}
