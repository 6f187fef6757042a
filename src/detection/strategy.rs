//! Period estimation strategies.
//!
//! Every strategy turns a [`PeakSeries`] into zero or more candidate
//! repetitions:
//! - [`Periodogram`]: Scargle periodogram over the peak positions
//! - [`HarmonicFit`]: Weighted least-squares cosine fit (also finds the phase)
//! - [`QuantileDistance`]: Weighted mean of the short peak gaps
//! - [`Combined`]: Average of the periodogram and quantile estimates

use std::fmt;
use std::str::FromStr;

use super::combined::Combined;
use super::harmonic::HarmonicFit;
use super::peaks::PeakSeries;
use super::periodogram::Periodogram;
use super::quantile::QuantileDistance;
use crate::core::PeriodCandidate;
use crate::error::DetectionError;

/// Trait for period estimators
pub trait PeriodEstimator {
    /// Estimate candidate repetitions from a peak series.
    ///
    /// An empty result means the series carries no usable repetition.
    fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate>;

    /// Get the name of this estimation method
    fn name(&self) -> &'static str;
}

/// Selects the period estimator used by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstimationStrategy {
    /// Scargle periodogram, up to ten candidates
    Periodogram,
    /// Harmonic fitting, one candidate with phase
    HarmonicFit,
    /// Quantile peak distance, one candidate
    QuantileDistance,
    /// Mean of the periodogram and quantile estimates
    #[default]
    Combined,
}

impl EstimationStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [EstimationStrategy; 4] = [
        EstimationStrategy::Periodogram,
        EstimationStrategy::HarmonicFit,
        EstimationStrategy::QuantileDistance,
        EstimationStrategy::Combined,
    ];

    /// Run the selected estimator with its default settings.
    pub fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate> {
        match self {
            EstimationStrategy::Periodogram => Periodogram.estimate(peaks),
            EstimationStrategy::HarmonicFit => HarmonicFit::default().estimate(peaks),
            EstimationStrategy::QuantileDistance => QuantileDistance.estimate(peaks),
            EstimationStrategy::Combined => Combined::default().estimate(peaks),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstimationStrategy::Periodogram => "periodogram",
            EstimationStrategy::HarmonicFit => "harmonic-fit",
            EstimationStrategy::QuantileDistance => "quantile-distance",
            EstimationStrategy::Combined => "combined",
        }
    }
}

impl fmt::Display for EstimationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimationStrategy {
    type Err = DetectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periodogram" => Ok(EstimationStrategy::Periodogram),
            "harmonic-fit" | "fitting" => Ok(EstimationStrategy::HarmonicFit),
            "quantile-distance" | "quantile" => Ok(EstimationStrategy::QuantileDistance),
            "combined" => Ok(EstimationStrategy::Combined),
            other => Err(DetectionError::InvalidParameter(format!(
                "unknown estimation strategy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::peaks::extract_peaks;

    #[test]
    fn default_is_combined() {
        assert_eq!(EstimationStrategy::default(), EstimationStrategy::Combined);
    }

    #[test]
    fn parses_names_and_aliases() {
        for strategy in EstimationStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<EstimationStrategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.as_str());
        }
        assert_eq!(
            "fitting".parse::<EstimationStrategy>(),
            Ok(EstimationStrategy::HarmonicFit)
        );
        assert_eq!(
            " Quantile ".parse::<EstimationStrategy>(),
            Ok(EstimationStrategy::QuantileDistance)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "wavelet".parse::<EstimationStrategy>().unwrap_err();
        assert!(matches!(err, DetectionError::InvalidParameter(_)));
        assert!(err.to_string().contains("wavelet"));
    }

    #[test]
    fn every_strategy_finds_period_three() {
        let sums: Vec<f64> = (0..30)
            .map(|i| if i % 3 == 2 { 10.0 } else { 0.0 })
            .collect();
        let peaks = extract_peaks(&sums);

        for strategy in EstimationStrategy::ALL {
            let candidates = strategy.estimate(&peaks);
            assert!(!candidates.is_empty(), "{strategy} found nothing");
            assert!(
                (candidates[0].period - 3.0).abs() < 0.3,
                "{strategy} returned {}",
                candidates[0].period
            );
        }
    }

    #[test]
    fn no_strategy_finds_anything_without_peaks() {
        let peaks = extract_peaks(&[0.0; 24]);
        for strategy in EstimationStrategy::ALL {
            assert!(strategy.estimate(&peaks).is_empty(), "{strategy}");
        }
    }
}
