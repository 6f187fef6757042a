//! Error types for the summing-detector library.

use thiserror::Error;

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, DetectionError>;

/// Errors that can occur while preparing or running a detection.
///
/// "Nothing detected" is never an error; it is an empty feature list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Input matrix has zero width or zero height.
    #[error("empty input data")]
    EmptyData,

    /// One row or column of the input differs in length from the first one.
    #[error("ragged input: line {index} has length {got}, expected {expected}")]
    RaggedData {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// Flat sample buffer does not match the declared dimensions.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A sample is NaN or infinite.
    #[error("non-finite sample at ({x}, {y})")]
    NonFiniteValue { x: usize, y: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DetectionError {
    /// Whether the error is a violation of the input matrix contract.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DetectionError::EmptyData
                | DetectionError::RaggedData { .. }
                | DetectionError::DimensionMismatch { .. }
                | DetectionError::NonFiniteValue { .. }
        )
    }
}
