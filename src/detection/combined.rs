//! Combined periodogram and quantile-distance estimator.

use tracing::trace;

use super::peaks::PeakSeries;
use super::periodogram::Periodogram;
use super::quantile::QuantileDistance;
use super::strategy::PeriodEstimator;
use crate::core::PeriodCandidate;

/// Reconciles the phase-agnostic quantile estimate with the periodogram.
///
/// The strongest periodogram period is snapped to the integer multiple
/// closest to the quantile period, and the two are averaged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combined {
    periodogram: Periodogram,
    quantile: QuantileDistance,
}

impl Combined {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `0.5 * quantile + 0.5 * spectral * round(quantile / spectral)`.
pub fn combine_periods(spectral: f64, quantile: f64) -> f64 {
    let multiplier = (quantile / spectral).round();
    0.5 * quantile + 0.5 * spectral * multiplier
}

impl PeriodEstimator for Combined {
    fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate> {
        let spectral = self.periodogram.estimate(peaks);
        let quantile = self.quantile.estimate(peaks);

        let (Some(spectral), Some(quantile)) = (spectral.first(), quantile.first()) else {
            trace!(len = peaks.len(), "combined: a component found no candidate");
            return Vec::new();
        };

        vec![PeriodCandidate::new(combine_periods(
            spectral.period,
            quantile.period,
        ))]
    }

    fn name(&self) -> &'static str {
        "combined"
    }
}
