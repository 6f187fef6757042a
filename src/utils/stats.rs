//! Statistical utility functions.

/// Denominators below this magnitude are treated as zero.
pub const EPSILON: f64 = 1e-14;

/// Estimate the `p`-th percentile (`0 < p <= 100`) of a slice.
///
/// Uses the `(n + 1)` plotting position: with sorted values `v`,
/// `pos = p * (n + 1) / 100`, positions below 1 map to the minimum, positions
/// at or above `n` map to the maximum, anything between is linearly
/// interpolated between `v[floor(pos) - 1]` and `v[floor(pos)]`.
///
/// # Example
/// ```
/// use summing_detector::utils::percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// // pos = 0.5 * 5 = 2.5 -> halfway between 2 and 3
/// assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    if values.len() == 1 {
        return values[0];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let pos = p * (n + 1) as f64 / 100.0;
    if pos < 1.0 {
        return sorted[0];
    }
    if pos >= n as f64 {
        return sorted[n - 1];
    }

    let floor = pos.floor();
    let index = floor as usize;
    let lower = sorted[index - 1];
    let upper = sorted[index];
    lower + (pos - floor) * (upper - lower)
}

/// Minimum of a slice (NaN if empty).
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::min)
}

/// Mean of a slice (NaN if empty).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// L1-normalize a slice so that its entries sum to 1.
///
/// A slice summing to (nearly) zero or to a non-finite total normalizes to
/// all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if !total.is_finite() || total.abs() < EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total).collect()
}
