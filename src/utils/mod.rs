//! Numerical utilities shared by the period estimators.

pub mod optimization;
pub mod stats;

pub use optimization::{levenberg_marquardt, LevenbergMarquardtConfig, LevenbergMarquardtResult};
pub use stats::{mean, min, normalize, percentile, EPSILON};
