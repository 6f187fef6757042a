//! Summing feature detector.
//!
//! Collapses a matrix onto each axis by summing, finds the peaks of each sum
//! series, estimates candidate repetition periods from the peaks and keeps
//! the candidate whose predicted repetitions carry the most energy.
//!
//! # Example
//! ```
//! use summing_detector::detection::{EstimationStrategy, FeatureDetector, SummingDetector};
//! use summing_detector::core::{FeatureKind, Matrix};
//!
//! // echoes every 4 rows, starting at row 0
//! let columns: Vec<Vec<f64>> = (0..8)
//!     .map(|_| (0..40).map(|y| if y % 4 == 0 { 5.0 } else { 0.0 }).collect())
//!     .collect();
//! let matrix = Matrix::from_columns(columns).unwrap();
//!
//! let detector = SummingDetector::default().with_strategy(EstimationStrategy::QuantileDistance);
//! let features = detector.detect(&matrix);
//!
//! let vertical = features
//!     .iter()
//!     .find(|f| f.kind() == FeatureKind::VerticalRepetition)
//!     .unwrap();
//! assert!((vertical.period() - 4.0).abs() < 1e-9);
//! ```

use tracing::debug;

use super::peaks::extract_peaks;
use super::quality::pick_best_candidate;
use super::strategy::EstimationStrategy;
use crate::core::{DetectedFeature, FeatureKind, Matrix, PeriodCandidate};
use crate::error::Result;

/// Trait for matrix feature detectors
pub trait FeatureDetector {
    /// Detect repetition features in a matrix.
    ///
    /// Returns at most one feature per axis, horizontal first.
    fn detect(&self, matrix: &Matrix) -> Vec<DetectedFeature>;

    /// Get the name of this detection method
    fn name(&self) -> &'static str;
}

/// Configuration for the summing detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummingConfig {
    /// Period estimator run on both axes (default: Combined)
    pub strategy: EstimationStrategy,
}

impl SummingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the period estimation strategy.
    pub fn with_strategy(mut self, strategy: EstimationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Detects repetitions along both axes of a matrix from its axis sums.
#[derive(Debug, Clone, Default)]
pub struct SummingDetector {
    config: SummingConfig,
}

impl SummingDetector {
    pub fn new(config: SummingConfig) -> Self {
        Self { config }
    }

    /// Set the period estimation strategy.
    pub fn with_strategy(mut self, strategy: EstimationStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn config(&self) -> &SummingConfig {
        &self.config
    }

    pub fn strategy(&self) -> EstimationStrategy {
        self.config.strategy
    }

    /// Best repetition of a single sum series, if any.
    pub fn detect_repetition(&self, sums: &[f64]) -> Option<PeriodCandidate> {
        let peaks = extract_peaks(sums);
        let mut candidates = self.config.strategy.estimate(&peaks);
        candidates.retain(PeriodCandidate::is_valid);
        let best = pick_best_candidate(&candidates, sums);

        debug!(
            strategy = %self.config.strategy,
            len = sums.len(),
            peaks = peaks.peak_count(),
            candidates = candidates.len(),
            period = best.map(|c| c.period),
            "repetition search finished"
        );
        best
    }

    /// Validate raw columns (`columns[x][y]`) and detect features in them.
    pub fn detect_columns(&self, columns: Vec<Vec<f64>>) -> Result<Vec<DetectedFeature>> {
        let matrix = Matrix::from_columns(columns)?;
        Ok(self.detect(&matrix))
    }
}

impl FeatureDetector for SummingDetector {
    fn detect(&self, matrix: &Matrix) -> Vec<DetectedFeature> {
        let axes = [
            (FeatureKind::HorizontalRepetition, matrix.column_sums()),
            (FeatureKind::VerticalRepetition, matrix.row_sums()),
        ];

        axes.into_iter()
            .filter_map(|(kind, sums)| {
                self.detect_repetition(&sums)
                    .map(|candidate| DetectedFeature::from_candidate(kind, candidate))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "summing"
    }
}

/// Detect features in raw columns with the default configuration.
pub fn detect_features(columns: Vec<Vec<f64>>) -> Result<Vec<DetectedFeature>> {
    SummingDetector::default().detect_columns(columns)
}
