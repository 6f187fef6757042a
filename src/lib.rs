//! # summing-detector
//!
//! Detection of periodic repetitions in scanned two-dimensional measurements.
//!
//! A matrix is collapsed onto each axis by summing. Peaks of each sum series
//! feed one of four period estimators (Scargle periodogram, harmonic cosine
//! fit, quantile peak distance, or their combination), and the candidate
//! whose predicted repetitions carry the most energy becomes a detected
//! feature. In ionograms the horizontal repetition corresponds to electron
//! plasma oscillations and the vertical one to electron cyclotron echoes.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod detection;
pub mod error;
pub mod simd;
pub mod utils;

pub use error::{DetectionError, Result};

pub mod prelude {
    pub use crate::core::{DetectedFeature, FeatureKind, Matrix, PeriodCandidate};
    pub use crate::detection::{
        detect_features, EstimationStrategy, FeatureDetector, PeriodEstimator, SummingConfig,
        SummingDetector,
    };
    pub use crate::error::{DetectionError, Result};
}
