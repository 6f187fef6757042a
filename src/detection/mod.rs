//! Repetition detection for scanned matrices.
//!
//! This module provides:
//! - Peak extraction from axis sum series
//! - Period estimators (periodogram, harmonic fit, quantile distance, combined)
//! - Candidate scoring against the sum series
//! - The [`SummingDetector`] tying these together per axis

mod combined;
mod fft;
mod harmonic;
mod peaks;
mod periodogram;
mod quality;
mod quantile;
mod strategy;
mod summing;

pub use combined::{combine_periods, Combined};
pub use fft::{dominant_component, fft_real};
pub use harmonic::{BoundedCosine, HarmonicFit, MIN_WEIGHT};
pub use peaks::{extract_peaks, filter_local_maxima, PeakSeries, PEAK_PERCENTILE};
pub use periodogram::{scargle_power, Periodogram, MAX_CANDIDATES};
pub use quality::{period_quality, pick_best_candidate};
pub use quantile::{peak_gaps, QuantileDistance, GAP_PERCENTILE};
pub use strategy::{EstimationStrategy, PeriodEstimator};
pub use summing::{detect_features, FeatureDetector, SummingConfig, SummingDetector};
