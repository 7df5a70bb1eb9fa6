//! Numeric helpers shared by the aggregator, profile builder and simulator.

/// Round to one decimal place, halves toward positive infinity
/// (`-0.25` becomes `-0.2`).
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation. Returns `None` for an empty slice.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Clamp a ratio into [0, 1]. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp a score into [0, 100]. NaN collapses to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

/// Format a ratio as a whole percentage, e.g. `0.834` -> `"83"`.
pub fn pct(value: f64) -> String {
    format!("{:.0}", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_rounds_halves_up() {
        assert_eq!(round1(3.75), 3.8);
        assert_eq!(round1(9.5), 9.5);
        assert_eq!(round1(3.333_333), 3.3);
        assert_eq!(round1(0.0), 0.0);
        assert_eq!(round1(-0.25), -0.2);
        assert_eq!(round1(-0.26), -0.3);
    }

    #[test]
    fn mean_and_std_dev_of_empty_are_none() {
        assert!(mean(&[]).is_none());
        assert!(std_dev(&[]).is_none());
    }

    #[test]
    fn std_dev_is_population_deviation() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12, "expected 2.0, got {sd}");
    }

    #[test]
    fn clamps_handle_nan_and_bounds() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(-3.0), 0.0);
    }

    #[test]
    fn ratio_or_falls_back_on_zero_denominator() {
        assert_eq!(ratio_or(5.0, 0.0, 0.8), 0.8);
        assert_eq!(ratio_or(3.0, 4.0, 0.8), 0.75);
    }
}
