use thiserror::Error;

/// Error types for the cuboid engine.
///
/// Geometry and projection never fail: degenerate boxes produce zero-area
/// polygons and non-finite inputs propagate as NaN. Only structurally
/// malformed input is reported here.
#[derive(Debug, Error, PartialEq)]
pub enum CuboidError {
    /// A calibration matrix does not have the expected Kitti shape.
    #[error("Invalid calibration matrix {name}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    InvalidCalibration {
        /// Name of the matrix (`P`, `R` or `T`).
        name: &'static str,
        /// Number of rows the matrix must have.
        expected_rows: usize,
        /// Number of columns every row must have.
        expected_cols: usize,
        /// Number of rows found.
        rows: usize,
        /// Length of the first offending row, or of the first row if the row count is wrong.
        cols: usize,
    },

    /// A calibration matrix contains NaN or infinite entries.
    #[error("Calibration matrix {name} contains non-finite values")]
    NonFiniteCalibration {
        /// Name of the matrix (`P`, `R` or `T`).
        name: &'static str,
    },

    /// A flat buffer length is not a multiple of 3.
    #[error("Buffer {name} has length {len} which is not a multiple of 3")]
    InvalidBufferLength {
        /// Label of the buffer.
        name: &'static str,
        /// Length of the buffer.
        len: usize,
    },

    /// Two buffers that must be parallel have different lengths.
    #[error("Mismatched buffer lengths: {left_name} ({left_len}) != {right_name} ({right_len})")]
    MismatchedBufferLengths {
        /// Label for the left-hand buffer.
        left_name: &'static str,
        /// Length of the left-hand buffer.
        left_len: usize,
        /// Label for the right-hand buffer.
        right_name: &'static str,
        /// Length of the right-hand buffer.
        right_len: usize,
    },
}

/// Result type for cuboid operations.
pub type CuboidResult<T> = Result<T, CuboidError>;
