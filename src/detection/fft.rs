//! FFT utilities for spectral initial guesses.

use rustfft::{num_complex::Complex64, FftPlanner};

/// Compute the FFT of a real-valued signal.
///
/// Returns the complex frequency domain representation.
/// Only returns the first half (positive frequencies) since
/// the input is real-valued and the spectrum is symmetric.
///
/// # Arguments
/// * `signal` - Input series (real values)
///
/// # Returns
/// Complex frequency components for frequency indices 0 to N/2
pub fn fft_real(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer.truncate(n / 2 + 1);
    buffer
}

/// Strongest spectral component whose angular frequency lies in `[min_freq, max_freq]`.
///
/// Returns `(angular_frequency, phase)` where the phase is that of
/// `cos(freq * x + phase)` at the component's bin, or `None` when no
/// bin above DC falls inside the band.
pub fn dominant_component(signal: &[f64], min_freq: f64, max_freq: f64) -> Option<(f64, f64)> {
    let n = signal.len();
    let spectrum = fft_real(signal);
    let slack = 1e-9 * max_freq.abs();

    spectrum
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| (2.0 * std::f64::consts::PI * k as f64 / n as f64, c))
        .filter(|(freq, _)| *freq >= min_freq - slack && *freq <= max_freq + slack)
        .max_by(|(_, a), (_, b)| {
            a.norm_sqr()
                .partial_cmp(&b.norm_sqr())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(freq, c)| (freq, c.im.atan2(c.re)))
}
