//! Period estimation from the distribution of peak gaps.
//!
//! Large gaps (missed peaks) inflate the naive mean gap, so only gaps between
//! the minimum and the 65th percentile are averaged, weighted by the mean
//! weight of the two peaks bounding each gap.

use tracing::trace;

use super::peaks::PeakSeries;
use super::strategy::PeriodEstimator;
use crate::core::PeriodCandidate;
use crate::utils::{min, percentile, EPSILON};

/// Upper percentile of the gaps kept for averaging.
pub const GAP_PERCENTILE: f64 = 65.0;

/// Quantile peak-distance estimator. Never determines the phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileDistance;

impl QuantileDistance {
    pub fn new() -> Self {
        Self
    }
}

/// Gaps between consecutive peaks, each paired with the mean weight of its two peaks.
pub fn peak_gaps(peaks: &PeakSeries) -> Vec<(f64, f64)> {
    let weights = peaks.weights();
    let positions: Vec<usize> = peaks.positions().collect();
    positions
        .windows(2)
        .map(|w| {
            let gap = (w[1] - w[0]) as f64;
            (gap, (weights[w[0]] + weights[w[1]]) / 2.0)
        })
        .collect()
}

impl PeriodEstimator for QuantileDistance {
    fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate> {
        let gaps = peak_gaps(peaks);
        match gaps.len() {
            0 => {
                trace!(len = peaks.len(), "quantile: fewer than two peaks");
                return Vec::new();
            }
            1 => return vec![PeriodCandidate::new(gaps[0].0)],
            _ => {}
        }

        let distances: Vec<f64> = gaps.iter().map(|(g, _)| *g).collect();
        let low = min(&distances);
        let high = percentile(&distances, GAP_PERCENTILE);
        let limit = gaps.len() / 2;

        let kept: Vec<(f64, f64)> = gaps
            .iter()
            .filter(|(g, _)| *g >= low && *g <= high)
            .take(limit)
            .copied()
            .collect();

        let period = match kept.as_slice() {
            [] => return Vec::new(),
            [(gap, _)] => *gap,
            _ => weighted_mean(&kept),
        };

        let candidate = PeriodCandidate::new(period);
        if !candidate.is_valid() {
            trace!(period, "quantile: weights of mixed sign");
            return Vec::new();
        }
        vec![candidate]
    }

    fn name(&self) -> &'static str {
        "quantile-distance"
    }
}

/// Weighted mean of `(value, weight)` pairs; plain mean when the weights vanish.
fn weighted_mean(pairs: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total_weight.abs() < EPSILON {
        return pairs.iter().map(|(v, _)| v).sum::<f64>() / pairs.len() as f64;
    }
    pairs.iter().map(|(v, w)| v * w / total_weight).sum()
}
