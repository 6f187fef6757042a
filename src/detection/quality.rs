//! Candidate scoring against the sum series.
//!
//! A candidate is good when the samples it predicts to be repetitions carry a
//! lot of energy: its quality is the mean sum value at `offset + k * period`.

use crate::core::PeriodCandidate;

/// Mean of `sums` sampled at `offset, offset + period, offset + 2 * period, ...`.
///
/// Positions are rounded to the nearest index; negative positions and
/// positions that round onto the previously sampled index are skipped.
/// Returns 0.0 when no position falls inside the series.
///
/// A period of at most one sample visits every index from the offset on, so
/// the walk is replaced by the mean of that tail.
pub fn period_quality(offset: i64, period: f64, sums: &[f64]) -> f64 {
    if !(period.is_finite() && period > 0.0) {
        return 0.0;
    }
    if period <= 1.0 {
        let start = offset.max(0) as usize;
        return match sums.get(start..) {
            Some(tail) if !tail.is_empty() => tail.iter().sum::<f64>() / tail.len() as f64,
            _ => 0.0,
        };
    }

    let len = sums.len() as f64;
    let mut total = 0.0;
    let mut count = 0usize;
    let mut previous: Option<i64> = None;

    let mut position = offset as f64;
    while position < len {
        let index = position.round() as i64;
        if index >= 0 && (index as usize) < sums.len() && previous != Some(index) {
            total += sums[index as usize];
            count += 1;
            previous = Some(index);
        }
        position += period;
    }

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Pick the candidate whose predicted repetitions carry the most energy.
///
/// A single candidate is returned unchanged. Ties keep the earlier candidate.
/// An unknown offset is scored as 0.
pub fn pick_best_candidate(candidates: &[PeriodCandidate], sums: &[f64]) -> Option<PeriodCandidate> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        [first, rest @ ..] => {
            let score = |c: &PeriodCandidate| period_quality(c.offset.unwrap_or(0), c.period, sums);
            let mut best = *first;
            let mut best_quality = score(first);
            for candidate in rest {
                let quality = score(candidate);
                if quality > best_quality {
                    best = *candidate;
                    best_quality = quality;
                }
            }
            Some(best)
        }
    }
}
