//! Harmonic fitting period estimator.
//!
//! Fits a unit-amplitude cosine `cos(freq * x + phase)` to the binary peak
//! series by weighted least squares. The frequency is confined to the band
//! between half the series length and the smallest peak gap by making the
//! model collapse to `-1` outside of it, with a derivative pointing back into
//! the band.

use std::f64::consts::PI;

use tracing::trace;

use super::fft::dominant_component;
use super::peaks::PeakSeries;
use super::strategy::PeriodEstimator;
use crate::core::PeriodCandidate;
use crate::utils::{levenberg_marquardt, mean, normalize, LevenbergMarquardtConfig, EPSILON};

/// Weight given to samples without a peak (the fit requires positive weights).
pub const MIN_WEIGHT: f64 = 0.001;

/// Unit cosine with a frequency band constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedCosine {
    /// Lowest admissible angular frequency (longest period).
    pub min_freq: f64,
    /// Highest admissible angular frequency (shortest period).
    pub max_freq: f64,
}

impl BoundedCosine {
    fn in_band(&self, freq: f64) -> bool {
        freq >= self.min_freq && freq <= self.max_freq
    }

    /// Model value at `x` for parameters `[freq, phase]`.
    pub fn value(&self, x: f64, params: &[f64; 2]) -> f64 {
        if !self.in_band(params[0]) {
            return -1.0;
        }
        (x * params[0] + params[1]).cos()
    }

    /// Partial derivatives `[d/dfreq, d/dphase]` at `x`.
    pub fn gradient(&self, x: f64, params: &[f64; 2]) -> [f64; 2] {
        let dp = -(x * params[0] + params[1]).sin();
        let df = if params[0] < self.min_freq {
            1.0
        } else if params[0] > self.max_freq {
            -1.0
        } else {
            dp * x
        };
        [df, dp]
    }
}

/// Harmonic fitting estimator. Determines both period and phase.
#[derive(Debug, Clone, Default)]
pub struct HarmonicFit {
    config: LevenbergMarquardtConfig,
}

impl HarmonicFit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom solver configuration.
    pub fn with_config(mut self, config: LevenbergMarquardtConfig) -> Self {
        self.config = config;
        self
    }

    /// Fit the cosine and return the raw `[freq, phase]` parameters.
    pub fn fit(&self, peaks: &PeakSeries) -> Option<[f64; 2]> {
        let n = peaks.len();
        let min_distance = peaks.min_peak_distance()?;
        let half = n / 2;
        if half == 0 {
            return None;
        }

        let model = BoundedCosine {
            min_freq: 2.0 * PI / half as f64,
            max_freq: 2.0 * PI / min_distance as f64,
        };
        if model.min_freq > model.max_freq {
            trace!(
                min_freq = model.min_freq,
                max_freq = model.max_freq,
                "harmonic fit: empty frequency band"
            );
            return None;
        }

        // square roots even out the weights
        let rooted: Vec<f64> = peaks.weights().iter().map(|w| w.max(0.0).sqrt()).collect();
        let weights: Vec<f64> = normalize(&rooted)
            .into_iter()
            .map(|w| if w > 0.0 { w } else { MIN_WEIGHT })
            .collect();
        let scale: Vec<f64> = weights.iter().map(|w| w.sqrt()).collect();
        let observations = peaks.peaks();

        let guess = initial_guess(observations, &weights, &model);
        let to_params = |p: &[f64]| -> [f64; 2] { [p[0], p[1]] };

        let result = levenberg_marquardt(
            |p| {
                let params = to_params(p);
                observations
                    .iter()
                    .zip(&scale)
                    .enumerate()
                    .map(|(i, (y, s))| s * (y - model.value(i as f64, &params)))
                    .collect()
            },
            |p| {
                let params = to_params(p);
                scale
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        let [df, dp] = model.gradient(i as f64, &params);
                        vec![-s * df, -s * dp]
                    })
                    .collect()
            },
            &guess,
            self.config.clone(),
        );

        trace!(
            iterations = result.iterations,
            converged = result.converged,
            cost = result.optimal_value,
            "harmonic fit finished"
        );

        let fit = to_params(&result.optimal_point);
        if fit.iter().all(|v| v.is_finite()) {
            Some(fit)
        } else {
            None
        }
    }
}

impl PeriodEstimator for HarmonicFit {
    fn estimate(&self, peaks: &PeakSeries) -> Vec<PeriodCandidate> {
        self.fit(peaks)
            .and_then(|[freq, phase]| candidate_from_fit(freq, phase))
            .into_iter()
            .collect()
    }

    fn name(&self) -> &'static str {
        "harmonic-fit"
    }
}

/// Period and whole-sample offset of a fitted `cos(freq * x + phase)`.
///
/// The frequency is wrapped into `[0, 2π)` and the phase into `[0, period)`;
/// the offset is the truncated phase, so it is always below the period.
fn candidate_from_fit(fit_freq: f64, fit_phase: f64) -> Option<PeriodCandidate> {
    let two_pi = 2.0 * PI;
    let freq = (fit_freq % two_pi + two_pi) % two_pi;
    if freq < EPSILON {
        return None;
    }
    let period = two_pi / freq;
    let phase = (fit_phase % period + period) % period;

    Some(PeriodCandidate::with_offset(phase.trunc() as i64, period))
}

/// Starting `[freq, phase]` from the strongest in-band component of the
/// mean-removed weighted observations.
fn initial_guess(observations: &[f64], weights: &[f64], model: &BoundedCosine) -> [f64; 2] {
    let weighted: Vec<f64> = observations
        .iter()
        .zip(weights)
        .map(|(y, w)| y * w)
        .collect();
    let offset = mean(&weighted);
    let centered: Vec<f64> = weighted.iter().map(|v| v - offset).collect();

    match dominant_component(&centered, model.min_freq, model.max_freq) {
        Some((freq, phase)) => [freq.clamp(model.min_freq, model.max_freq), phase],
        None => [0.5 * (model.min_freq + model.max_freq), 0.0],
    }
}
