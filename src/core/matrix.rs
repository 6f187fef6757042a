//! Matrix data structure for scanned two-dimensional measurements.

use crate::error::{DetectionError, Result};
use crate::simd;

/// An immutable, rectangular matrix of samples.
///
/// Samples are addressed as `data[x][y]`: `x` is the column (horizontal axis,
/// `0..width`) and `y` the row (vertical axis, `0..height`). Storage is
/// column-major so that each column is a contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from its columns (`columns[x][y]`).
    ///
    /// Fails on an empty input, on columns of differing length and on
    /// non-finite samples.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map(|c| c.len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyData);
        }

        let mut values = Vec::with_capacity(width * height);
        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(DetectionError::RaggedData {
                    index: x,
                    expected: height,
                    got: column.len(),
                });
            }
            values.extend(column);
        }

        Self::from_column_major(width, height, values)
    }

    /// Create a matrix from its rows (`rows[y][x]`).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyData);
        }

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DetectionError::RaggedData {
                    index: y,
                    expected: width,
                    got: row.len(),
                });
            }
        }

        let values = (0..width)
            .flat_map(|x| rows.iter().map(move |row| row[x]))
            .collect();
        Self::from_column_major(width, height, values)
    }

    /// Create a matrix from a flat column-major buffer of `width * height` samples.
    pub fn from_column_major(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyData);
        }
        if values.len() != width * height {
            return Err(DetectionError::DimensionMismatch {
                expected: width * height,
                got: values.len(),
            });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(DetectionError::NonFiniteValue {
                x: pos / height,
                y: pos % height,
            });
        }

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[x * self.height + y])
        } else {
            None
        }
    }

    /// Column `x` as a contiguous slice of `height` samples.
    pub fn column(&self, x: usize) -> Option<&[f64]> {
        if x < self.width {
            Some(&self.values[x * self.height..(x + 1) * self.height])
        } else {
            None
        }
    }

    /// Number of leading columns that contribute to the axis sums.
    ///
    /// Only the first half of the width is summed, for both axes.
    pub fn summed_width(&self) -> usize {
        self.width / 2
    }

    /// Sums of the first [`summed_width`](Self::summed_width) columns.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.summed_width())
            .map(|x| simd::sum(&self.values[x * self.height..(x + 1) * self.height]))
            .collect()
    }

    /// Sums of every row over the first [`summed_width`](Self::summed_width) columns.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.summed_width()).fold(vec![0.0; self.height], |acc, x| {
            simd::add(&acc, &self.values[x * self.height..(x + 1) * self.height])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_columns() -> Vec<Vec<f64>> {
        // 4 columns x 3 rows
        vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
            vec![10.0, 11.0, 12.0],
        ]
    }

    #[test]
    fn from_columns_dimensions() {
        let m = Matrix::from_columns(sample_columns()).unwrap();
        assert_eq!(m.width(), 4);
        assert_eq!(m.height(), 3);
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(4, 0), None);
        assert_eq!(m.column(3), Some(&[10.0, 11.0, 12.0][..]));
    }

    #[test]
    fn from_rows_transposes() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let m = Matrix::from_rows(&rows).unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.height(), 3);
        assert_eq!(m.column(0), Some(&[1.0, 3.0, 5.0][..]));
        assert_eq!(m.get(1, 2), Some(6.0));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Matrix::from_columns(vec![]), Err(DetectionError::EmptyData));
        assert_eq!(
            Matrix::from_columns(vec![vec![], vec![]]),
            Err(DetectionError::EmptyData)
        );
        assert_eq!(Matrix::from_rows(&[]), Err(DetectionError::EmptyData));
        assert_eq!(
            Matrix::from_column_major(0, 3, vec![]),
            Err(DetectionError::EmptyData)
        );
    }

    #[test]
    fn ragged_input_is_rejected() {
        let err = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            DetectionError::RaggedData {
                index: 1,
                expected: 2,
                got: 1
            }
        );

        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn flat_buffer_size_is_checked() {
        let err = Matrix::from_column_major(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            DetectionError::DimensionMismatch {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn non_finite_sample_is_reported_with_position() {
        let err = Matrix::from_columns(vec![vec![1.0, 2.0], vec![3.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, DetectionError::NonFiniteValue { x: 1, y: 1 });
    }

    #[test]
    fn axis_sums_use_first_half_of_width() {
        let m = Matrix::from_columns(sample_columns()).unwrap();
        assert_eq!(m.summed_width(), 2);

        let cols = m.column_sums();
        assert_eq!(cols.len(), 2);
        assert_relative_eq!(cols[0], 6.0, epsilon = 1e-5);
        assert_relative_eq!(cols[1], 15.0, epsilon = 1e-5);

        let rows = m.row_sums();
        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0], 5.0, epsilon = 1e-5);
        assert_relative_eq!(rows[1], 7.0, epsilon = 1e-5);
        assert_relative_eq!(rows[2], 9.0, epsilon = 1e-5);
    }

    #[test]
    fn single_column_has_no_summed_columns() {
        let m = Matrix::from_columns(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(m.column_sums().is_empty());
        assert_eq!(m.row_sums(), vec![0.0, 0.0, 0.0]);
    }
}
