//! Error types for analysis operations.

use std::fmt;
use thiserror::Error;

/// Which end of an interval a request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Lower end of the interval.
    Start,
    /// Upper end of the interval.
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => f.write_str("start"),
            Bound::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested interval reaches past the available data.
    #[error("{bound} {value} lies outside the available range (limit {limit})")]
    OutOfRange {
        /// Which end was violated.
        bound: Bound,
        /// Requested position.
        value: f64,
        /// Closest position the data allows.
        limit: f64,
    },

    /// Paired inputs disagree in length.
    #[error("shape mismatch: {what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        /// Which input had the wrong length.
        what: &'static str,
        /// Length required by the other inputs.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Failed to write an export file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a shape mismatch error.
    pub fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject non-positive or non-finite sample rates.
pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "sample rate must be positive and finite, got {sample_rate}"
        )))
    }
}
