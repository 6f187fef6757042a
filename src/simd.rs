//! SIMD-accelerated accumulation via Trueno (f32 internal).
//!
//! Scanned measurements are single-precision samples, so the axis sums of a
//! [`Matrix`](crate::core::Matrix) are accumulated in `f32` lanes and widened
//! back to `f64` for the estimators.
//!
//! # Example
//!
//! ```
//! use summing_detector::simd;
//!
//! let column = vec![1.0, 2.0, 3.0, 4.0];
//! assert!((simd::sum(&column) - 10.0).abs() < 1e-6);
//!
//! let acc = simd::add(&[1.0, 2.0], &[3.0, 4.0]);
//! assert!((acc[1] - 6.0).abs() < 1e-6);
//! ```

use trueno::Vector;

#[inline]
fn to_f32(data: &[f64]) -> Vec<f32> {
    data.iter().map(|&x| x as f32).collect()
}

#[inline]
fn to_f64(data: &[f32]) -> Vec<f64> {
    data.iter().map(|&x| x as f64).collect()
}

/// Sum of all elements.
///
/// Falls back to a scalar `f64` sum if the SIMD backend rejects the input or
/// the single-precision result overflows.
#[inline]
pub fn sum(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let f32_data = to_f32(data);
    Vector::from_slice(&f32_data)
        .sum()
        .ok()
        .map(|s| s as f64)
        .filter(|s| s.is_finite())
        .unwrap_or_else(|| data.iter().sum())
}

/// Element-wise addition: a[i] + b[i].
///
/// Overflowing single-precision lanes fall back to a scalar `f64` addition.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
#[inline]
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "vectors must have same length");
    if a.is_empty() {
        return Vec::new();
    }
    let a_f32 = to_f32(a);
    let b_f32 = to_f32(b);
    let va = Vector::from_slice(&a_f32);
    let vb = Vector::from_slice(&b_f32);
    va.add(&vb)
        .ok()
        .map(|v| to_f64(v.as_slice()))
        .filter(|v| v.iter().all(|x| x.is_finite()))
        .unwrap_or_else(|| a.iter().zip(b.iter()).map(|(x, y)| x + y).collect())
}
