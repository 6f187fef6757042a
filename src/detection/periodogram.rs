//! Scargle periodogram period estimator.
//!
//! Evaluates the phase-corrected periodogram of the binary peak series
//! (Scargle 1982, "Studies in astronomical time series analysis II") on the
//! Fourier grid between the smallest peak gap and half the series length.

use std::f64::consts::PI;

use tracing::trace;

use super::peaks::PeakSeries;
use super::strategy::PeriodEstimator;
use crate::core::PeriodCandidate;
use crate::utils::EPSILON;

/// Maximum number of candidate periods reported.
pub const MAX_CANDIDATES: usize = 10;

/// Periodogram estimator. Never determines the phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Periodogram;

impl Periodogram {
    pub fn new() -> Self {
        Self
    }

    /// `(power, angular_frequency)` pairs sorted by power, highest first.
    pub fn spectrum(&self, peaks: &PeakSeries) -> Vec<(f64, f64)> {
        let Some(min_distance) = peaks.min_peak_distance() else {
            return Vec::new();
        };

        let t = peaks.len();
        let first = (t as f64 / min_distance as f64).ceil() as usize;
        let last = t / 2;

        let mut spectrum: Vec<(f64, f64)> = (first..=last)
            .map(|n_f| {
                let freq = 2.0 * PI * n_f as f64 / t as f64;
                (scargle_power(freq, peaks.peaks()), freq)
            })
            .collect();

        spectrum.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        spectrum
    }
}

impl PeriodEstimator for Periodogram {
    fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate> {
        let spectrum = self.spectrum(peaks);
        if spectrum.is_empty() {
            trace!(len = peaks.len(), "periodogram: no frequencies to evaluate");
            return Vec::new();
        }

        spectrum
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(|(_, freq)| PeriodCandidate::new(2.0 * PI / freq))
            .collect()
    }

    fn name(&self) -> &'static str {
        "periodogram"
    }
}

/// Phase-corrected periodogram value `P(freq)` of an evenly sampled series.
///
/// Sample `values[k]` sits at time `k + 1`.
pub fn scargle_power(freq: f64, values: &[f64]) -> f64 {
    let (tau_sin, tau_cos) = (1..=values.len()).fold((0.0, 0.0), |(s, c), i| {
        let arg = 2.0 * freq * i as f64;
        (s + arg.sin(), c + arg.cos())
    });

    let tau = if tau_cos < EPSILON {
        0.0
    } else {
        (tau_sin / tau_cos).atan() / (2.0 * PI)
    };

    let mut cos_val_sum = 0.0;
    let mut cos_sum = 0.0;
    let mut sin_val_sum = 0.0;
    let mut sin_sum = 0.0;
    for (k, &value) in values.iter().enumerate() {
        let arg = freq * ((k + 1) as f64 - tau);
        let (sin, cos) = arg.sin_cos();
        cos_val_sum += value * cos;
        cos_sum += cos * cos;
        sin_val_sum += value * sin;
        sin_sum += sin * sin;
    }

    if cos_sum < EPSILON || sin_sum < EPSILON {
        return 0.0;
    }
    if cos_val_sum < EPSILON {
        cos_val_sum = 0.0;
    }
    if sin_val_sum < EPSILON {
        sin_val_sum = 0.0;
    }

    0.5 * (cos_val_sum * cos_val_sum / cos_sum + sin_val_sum * sin_val_sum / sin_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::peaks::extract_peaks;
    use approx::assert_relative_eq;

    fn spike_train(n: usize, period: usize, offset: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                if i >= offset && (i - offset) % period == 0 {
                    10.0
                } else {
                    0.0
                }
            })
            .collect()
    }

    #[test]
    fn recovers_period_three() {
        let peaks = extract_peaks(&spike_train(30, 3, 2));
        let candidates = Periodogram.estimate(&peaks);

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= MAX_CANDIDATES);
        assert!(candidates.iter().all(|c| c.offset.is_none()));
        assert_relative_eq!(candidates[0].period, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn spike_train_harmonics_share_power() {
        // a bare spike train has a flat spectrum: every harmonic of the
        // true period is equally likely and the quality scorer decides
        let peaks = extract_peaks(&spike_train(120, 8, 7));
        let candidates = Periodogram.estimate(&peaks);

        assert!(candidates.iter().any(|c| (c.period - 8.0).abs() < 1e-9));
        let ratio = 8.0 / candidates[0].period;
        assert_relative_eq!(ratio, ratio.round(), epsilon = 1e-9);
    }

    #[test]
    fn spectrum_is_sorted_by_power() {
        let peaks = extract_peaks(&spike_train(60, 5, 1));
        let spectrum = Periodogram.spectrum(&peaks);

        assert!(spectrum.windows(2).all(|w| w[0].0 >= w[1].0));
        // frequencies stay between 2π/min_gap and π
        assert!(spectrum
            .iter()
            .all(|(_, f)| *f >= 2.0 * PI / 5.0 - 1e-12 && *f <= PI + 1e-12));
    }

    #[test]
    fn single_peak_gives_no_candidate() {
        let mut sums = vec![0.0; 20];
        sums[7] = 4.0;
        let peaks = extract_peaks(&sums);

        assert!(Periodogram.estimate(&peaks).is_empty());
    }

    #[test]
    fn nyquist_frequency_has_zero_power() {
        // sin(π i) vanishes at every sample
        let values = vec![1.0; 16];
        assert_eq!(scargle_power(PI, &values), 0.0);
    }

    #[test]
    fn power_is_non_negative() {
        let values: Vec<f64> = (0..32).map(|i| ((i * 7) % 5) as f64).collect();
        for n_f in 1..16 {
            let freq = 2.0 * PI * n_f as f64 / 32.0;
            assert!(scargle_power(freq, &values) >= 0.0);
        }
    }
}
