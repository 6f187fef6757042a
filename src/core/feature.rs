//! Period candidates and detected repetition features.

use std::fmt;

/// Number of harmonics reported with every detected feature.
pub const HARMONIC_COUNT: usize = 8;

/// A candidate repetition produced by a period estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodCandidate {
    /// Phase of the repetition in samples, if the estimator can determine it.
    pub offset: Option<i64>,
    /// Repetition period in samples.
    pub period: f64,
}

impl PeriodCandidate {
    /// Candidate without a known phase.
    pub fn new(period: f64) -> Self {
        Self {
            offset: None,
            period,
        }
    }

    /// Candidate with a known phase.
    pub fn with_offset(offset: i64, period: f64) -> Self {
        Self {
            offset: Some(offset),
            period,
        }
    }

    /// Whether the period is a positive finite number.
    pub fn is_valid(&self) -> bool {
        self.period.is_finite() && self.period > 0.0
    }
}

/// Axis along which a repetition was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Repetition in the column sums (along the horizontal axis).
    HorizontalRepetition,
    /// Repetition in the row sums (along the vertical axis).
    VerticalRepetition,
}

impl FeatureKind {
    /// The ionospheric phenomenon this repetition corresponds to in an ionogram.
    pub fn physical_name(&self) -> &'static str {
        match self {
            FeatureKind::HorizontalRepetition => "electron plasma oscillation",
            FeatureKind::VerticalRepetition => "electron cyclotron echoes",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::HorizontalRepetition => write!(f, "horizontal repetition"),
            FeatureKind::VerticalRepetition => write!(f, "vertical repetition"),
        }
    }
}

/// A repeating pattern found in one axis of a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedFeature {
    kind: FeatureKind,
    offset: i64,
    period: f64,
    harmonic_count: usize,
}

impl DetectedFeature {
    /// Build a feature from the winning candidate of one axis.
    ///
    /// An unknown offset is reported as 0.
    pub fn from_candidate(kind: FeatureKind, candidate: PeriodCandidate) -> Self {
        Self {
            kind,
            offset: candidate.offset.unwrap_or(0),
            period: candidate.period,
            harmonic_count: HARMONIC_COUNT,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn harmonic_count(&self) -> usize {
        self.harmonic_count
    }
}

impl fmt::Display for DetectedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(offset={}, period={:.3}, harmonics={})",
            self.kind, self.offset, self.period, self.harmonic_count
        )
    }
}
