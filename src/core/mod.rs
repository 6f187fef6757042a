//! Core data structures for repetition detection.

mod feature;
mod matrix;

pub use feature::{DetectedFeature, FeatureKind, PeriodCandidate, HARMONIC_COUNT};
pub use matrix::Matrix;
