//! Peak extraction from axis sum series.
//!
//! A sum series is thresholded at its 60th percentile, every rising-then-falling
//! run of surviving values is collapsed onto its apex, and the survivors are
//! split into a binary position series and a normalized weight series.

use crate::error::{DetectionError, Result};
use crate::utils::{normalize, percentile};

/// Percentile of the sum series below which samples are discarded.
pub const PEAK_PERCENTILE: f64 = 60.0;

/// Peak positions and their relative magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakSeries {
    /// 1.0 at every peak position, 0.0 elsewhere.
    peaks: Vec<f64>,
    /// Normalized peak magnitudes (sum to 1 when any peak exists).
    weights: Vec<f64>,
}

impl PeakSeries {
    /// Build a peak series from already prepared parts.
    pub fn from_parts(peaks: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        if peaks.len() != weights.len() {
            return Err(DetectionError::DimensionMismatch {
                expected: peaks.len(),
                got: weights.len(),
            });
        }
        Ok(Self { peaks, weights })
    }

    pub fn peaks(&self) -> &[f64] {
        &self.peaks
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Length of the underlying sum series.
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// Whether the underlying sum series is empty.
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Indices of the peaks, in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.peaks
            .iter()
            .enumerate()
            .filter(|(_, &p)| p != 0.0)
            .map(|(i, _)| i)
    }

    /// Number of peaks.
    pub fn peak_count(&self) -> usize {
        self.positions().count()
    }

    /// Smallest gap between two consecutive peaks, `None` with fewer than two peaks.
    pub fn min_peak_distance(&self) -> Option<usize> {
        let mut positions = self.positions();
        let mut prev = positions.next()?;
        let mut min_distance: Option<usize> = None;
        for pos in positions {
            let gap = pos - prev;
            min_distance = Some(min_distance.map_or(gap, |d| d.min(gap)));
            prev = pos;
        }
        min_distance
    }
}

/// Extract peaks from a sum series.
///
/// # Example
/// ```
/// use summing_detector::detection::extract_peaks;
///
/// let sums = [0.0, 1.0, 4.0, 9.0, 4.0, 1.0, 0.0, 0.0, 0.0, 0.0];
/// let peaks = extract_peaks(&sums);
/// assert_eq!(peaks.positions().collect::<Vec<_>>(), vec![3]);
/// assert!((peaks.weights()[3] - 1.0).abs() < 1e-12);
/// ```
pub fn extract_peaks(sums: &[f64]) -> PeakSeries {
    let n = sums.len();
    if n == 0 {
        return PeakSeries {
            peaks: Vec::new(),
            weights: Vec::new(),
        };
    }

    let threshold = percentile(sums, PEAK_PERCENTILE);
    let mut peaks: Vec<f64> = sums
        .iter()
        .map(|&s| if s >= threshold { s } else { 0.0 })
        .collect();

    filter_local_maxima(&mut peaks);

    let weights = normalize(&peaks);
    for p in peaks.iter_mut() {
        if *p != 0.0 {
            *p = 1.0;
        }
    }

    PeakSeries { peaks, weights }
}

/// Leave only local maxima in the data, put zeros elsewhere.
///
/// Sweeps left to right; at every apex the non-decreasing positive run on its
/// left and the non-increasing positive run on its right are zeroed, and the
/// sweep resumes after the consumed run.
pub fn filter_local_maxima(peaks: &mut [f64]) {
    let n = peaks.len();
    if n < 2 {
        return;
    }

    let mut i = 0;
    while i < n - 1 {
        if (i == 0 || peaks[i - 1] <= peaks[i]) && peaks[i + 1] <= peaks[i] {
            if i > 0 {
                let mut j = i - 1;
                while j > 0 && peaks[j] > 0.0 && peaks[j] <= peaks[j + 1] {
                    j -= 1;
                }
                for p in &mut peaks[j..i] {
                    *p = 0.0;
                }
            }

            let apex = i;
            i += 1;
            while i < n - 1 && peaks[i] > 0.0 && peaks[i] >= peaks[i + 1] {
                peaks[i] = 0.0;
                i += 1;
            }
            peaks[apex + 1] = 0.0;
        }
        i += 1;
    }
}
