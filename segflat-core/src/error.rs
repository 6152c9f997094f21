//! Error types for the segmented primitives
//!
//! Precondition violations (non-associative operators, wrong neutral
//! elements) are caller contracts and are not represented here. Only
//! structural failures that can be detected before any computation starts
//! surface as errors.

use thiserror::Error;

/// Errors raised by segmented primitives and their supporting layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegError {
    /// Parallel input arrays disagree in length
    #[error("shape mismatch in {operation}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// The primitive that rejected its arguments
        operation: &'static str,
        /// Length of the leading array
        expected: usize,
        /// Length of the offending array
        actual: usize,
    },

    /// Input rejected by strict precondition checking
    #[error("invalid input to {operation}: {reason}")]
    InvalidInput {
        /// The primitive that rejected its arguments
        operation: &'static str,
        /// Why the input was rejected
        reason: String,
    },

    /// Thread pool construction failed
    #[error("thread pool construction failed: {0}")]
    ThreadPool(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Fixture loading or evaluation error
    #[error("fixture error: {0}")]
    Fixture(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SegError {
    fn from(err: std::io::Error) -> Self {
        SegError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SegError {
    fn from(err: toml::de::Error) -> Self {
        SegError::Fixture(err.to_string())
    }
}

impl From<serde_json::Error> for SegError {
    fn from(err: serde_json::Error) -> Self {
        SegError::Fixture(err.to_string())
    }
}

/// Result type for segmented operations
pub type Result<T> = std::result::Result<T, SegError>;

/// Fail with [`SegError::ShapeMismatch`] unless both lengths agree.
pub(crate) fn check_shape(operation: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SegError::ShapeMismatch {
            operation,
            expected,
            actual,
        })
    }
}
