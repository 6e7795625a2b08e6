//! Time-series helpers for the derived detection parameters.

/// Trailing moving average over the last `window` values. The window is
/// clamped to the available history; an empty series yields an empty result.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() || window == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let n = (i + 1).min(window);
        out.push(sum / n as f64);
    }
    out
}

/// Largest relative step change |Δ| / |prev| across the series. Steps from
/// a zero value are skipped. Fewer than two values yields 0.0.
pub fn max_relative_gradient(values: &[f64]) -> f64 {
    values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| ((w[1] - w[0]) / w[0]).abs())
        .fold(0.0, f64::max)
}

/// Whether any relative step change exceeds the configured gradient
/// threshold.
pub fn exceeds_gradient(values: &[f64], threshold: f64) -> bool {
    max_relative_gradient(values) > threshold
}
