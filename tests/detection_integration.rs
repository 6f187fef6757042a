//! Integration tests for the summing detector.
//!
//! Synthetic ionogram-like matrices with known repetitions are run through
//! the public API with every estimation strategy.

use approx::assert_relative_eq;
use summing_detector::prelude::*;
use summing_detector::detection::{extract_peaks, period_quality, pick_best_candidate};

/// Spike series of `len` samples: `height` every `period` samples from `offset`.
fn spike_series(len: usize, period: usize, offset: usize, height: f64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            if i >= offset && (i - offset) % period == 0 {
                height
            } else {
                0.0
            }
        })
        .collect()
}

/// Matrix whose first half of columns carries horizontal spikes every
/// `col_period` columns and vertical spikes every `row_period` rows.
fn ionogram(width: usize, height: usize, col_period: usize, row_period: usize) -> Matrix {
    let columns: Vec<Vec<f64>> = (0..width)
        .map(|x| {
            (0..height)
                .map(|y| {
                    if x % col_period == 0 && y % row_period == 0 {
                        10.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    Matrix::from_columns(columns).unwrap()
}

fn feature_of(features: &[DetectedFeature], kind: FeatureKind) -> Option<DetectedFeature> {
    features.iter().copied().find(|f| f.kind() == kind)
}

// =============================================================================
// Reference series: period 3, offset 2
// =============================================================================

#[test]
fn every_estimator_recovers_reference_period() {
    let sums = spike_series(30, 3, 2, 10.0);
    let peaks = extract_peaks(&sums);

    for strategy in EstimationStrategy::ALL {
        let candidates = strategy.estimate(&peaks);
        assert!(!candidates.is_empty(), "{strategy} found nothing");
        let period = candidates[0].period;
        assert!(
            (period - 3.0).abs() <= 0.3,
            "{strategy}: expected period within 10% of 3, got {period}"
        );
    }
}

#[test]
fn quality_prefers_period_carrying_the_energy() {
    let sums = spike_series(63, 3, 0, 10.0);
    let candidates = [
        PeriodCandidate::with_offset(0, 3.0),
        PeriodCandidate::with_offset(0, 7.0),
    ];

    assert!(period_quality(0, 3.0, &sums) > period_quality(0, 7.0, &sums));
    assert_eq!(pick_best_candidate(&candidates, &sums), Some(candidates[0]));
}

// =============================================================================
// End-to-end detection
// =============================================================================

#[test]
fn detects_both_repetitions() {
    // 40 summed columns with a spike column every 4, rows every 5
    let matrix = ionogram(80, 60, 4, 5);

    for strategy in EstimationStrategy::ALL {
        let detector = SummingDetector::default().with_strategy(strategy);
        let features = detector.detect(&matrix);
        assert_eq!(features.len(), 2, "{strategy}");

        let horizontal = feature_of(&features, FeatureKind::HorizontalRepetition).unwrap();
        let vertical = feature_of(&features, FeatureKind::VerticalRepetition).unwrap();
        assert!(
            (horizontal.period() - 4.0).abs() < 0.4,
            "{strategy}: horizontal period {}",
            horizontal.period()
        );
        assert!(
            (vertical.period() - 5.0).abs() < 0.5,
            "{strategy}: vertical period {}",
            vertical.period()
        );
    }
}

#[test]
fn phase_less_estimators_report_offset_zero() {
    let matrix = ionogram(40, 40, 4, 4);
    let features = SummingDetector::default()
        .with_strategy(EstimationStrategy::QuantileDistance)
        .detect(&matrix);

    for feature in features {
        assert_eq!(feature.offset(), 0);
        assert_relative_eq!(feature.period(), 4.0, epsilon = 1e-9);
    }
}

#[test]
fn only_left_half_of_the_matrix_is_summed() {
    // the right half carries a different row period that must be ignored
    let columns: Vec<Vec<f64>> = (0..40)
        .map(|x| {
            let period = if x < 20 { 4 } else { 7 };
            spike_series(56, period, 0, 10.0)
        })
        .collect();
    let features = SummingDetector::default()
        .with_strategy(EstimationStrategy::QuantileDistance)
        .detect_columns(columns)
        .unwrap();

    let vertical = feature_of(&features, FeatureKind::VerticalRepetition).unwrap();
    assert_relative_eq!(vertical.period(), 4.0, epsilon = 1e-9);
}

#[test]
fn row_major_input_matches_column_major_input() {
    let rows: Vec<Vec<f64>> = (0..24)
        .map(|y| {
            (0..16)
                .map(|x| if x % 3 == 0 && y % 4 == 0 { 7.0 } else { 1.0 })
                .collect()
        })
        .collect();
    let columns: Vec<Vec<f64>> = (0..16)
        .map(|x| rows.iter().map(|row| row[x]).collect())
        .collect();

    let detector = SummingDetector::default();
    let from_rows = detector.detect(&Matrix::from_rows(&rows).unwrap());
    let from_columns = detector.detect_columns(columns).unwrap();
    assert_eq!(from_rows, from_columns);
}

#[test]
fn detection_is_idempotent() {
    let matrix = ionogram(32, 48, 3, 6);
    for strategy in EstimationStrategy::ALL {
        let detector = SummingDetector::default().with_strategy(strategy);
        assert_eq!(detector.detect(&matrix), detector.detect(&matrix));
    }
}

#[test]
fn small_well_formed_matrices_never_fail() {
    for width in 1..8 {
        for height in 1..8 {
            let columns: Vec<Vec<f64>> = (0..width)
                .map(|x| (0..height).map(|y| ((x * 7 + y * 3) % 5) as f64).collect())
                .collect();
            let features = detect_features(columns).unwrap();
            assert!(features.len() <= 2);
        }
    }
}

#[test]
fn huge_samples_never_yield_non_finite_periods() {
    let columns: Vec<Vec<f64>> = (0..40)
        .map(|x| {
            (0..40)
                .map(|y| if x % 4 == 0 && y % 5 == 0 { 1e39 } else { 1.0 })
                .collect()
        })
        .collect();
    let matrix = Matrix::from_columns(columns).unwrap();
    assert!(matrix.column_sums().iter().all(|s| s.is_finite()));
    assert!(matrix.row_sums().iter().all(|s| s.is_finite()));

    for strategy in EstimationStrategy::ALL {
        let features = SummingDetector::default().with_strategy(strategy).detect(&matrix);
        for feature in &features {
            assert!(
                feature.period().is_finite() && feature.period() > 0.0,
                "{strategy}: {feature}"
            );
        }
    }
}

#[test]
fn overflowing_sums_never_yield_non_finite_periods() {
    let columns = vec![vec![f64::MAX; 12]; 12];
    for strategy in EstimationStrategy::ALL {
        let features = SummingDetector::default()
            .with_strategy(strategy)
            .detect_columns(columns.clone())
            .unwrap();
        assert!(features.iter().all(|f| f.period().is_finite() && f.period() > 0.0));
    }
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn empty_matrices_are_rejected() {
    assert_eq!(detect_features(vec![]), Err(DetectionError::EmptyData));
    assert_eq!(
        detect_features(vec![vec![], vec![]]),
        Err(DetectionError::EmptyData)
    );
    assert!(Matrix::from_rows(&[]).unwrap_err().is_invalid_input());
}

#[test]
fn ragged_matrices_are_rejected() {
    let err = detect_features(vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err, DetectionError::RaggedData { .. }));
}

#[test]
fn non_finite_samples_are_rejected() {
    let err = detect_features(vec![vec![1.0, f64::NAN], vec![1.0, 2.0]]).unwrap_err();
    assert_eq!(err, DetectionError::NonFiniteValue { x: 0, y: 1 });
}

#[test]
fn feature_display() {
    let feature = DetectedFeature::from_candidate(
        FeatureKind::VerticalRepetition,
        PeriodCandidate::with_offset(2, 3.0),
    );
    assert_eq!(
        feature.to_string(),
        "vertical repetition(offset=2, period=3.000, harmonics=8)"
    );
    assert_eq!(feature.kind().physical_name(), "electron cyclotron echoes");
}
