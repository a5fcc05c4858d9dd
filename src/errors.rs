use std::fmt;

use thiserror::Error;

use crate::types::SourceKey;

/// Fatal pipeline failures: the source itself cannot be read.
///
/// Implemented by hand rather than via `#[derive(Error)]`: the `source`
/// field carries the failing source's identity (a plain `SourceKey`), but
/// `thiserror` unconditionally treats any field literally named `source` as
/// the underlying `std::error::Error` source, which a `String` is not. The
/// impls below reproduce exactly what the derive would generate for these
/// messages, plus the `From<csv::Error>` conversion.
#[derive(Debug)]
pub enum PipelineError {
    /// The export could not be opened or stat'ed at all.
    DataSource {
        /// Identity of the source that failed.
        source: SourceKey,
        /// Underlying failure description.
        reason: String,
    },
    /// Passthrough for CSV-layer failures outside row decoding.
    Csv(csv::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::DataSource { source, reason } => {
                write!(f, "data source '{source}' is unreadable: {reason}")
            }
            PipelineError::Csv(err) => write!(f, "csv layer failure: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::DataSource { .. } => None,
            PipelineError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err)
    }
}

/// Row-scoped validation failures, recovered by dropping the row.
///
/// These never abort a batch; they are public so row-level validation can be
/// exercised directly.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RowError {
    /// The timestamp text could not be parsed even after repair.
    #[error("timestamp '{0}' could not be parsed after repair")]
    MalformedDate(String),
    /// The purchase address has fewer than three comma-separated segments.
    #[error("address '{0}' does not contain a city and state segment")]
    MalformedAddress(String),
    /// The quantity field is not a positive integer.
    #[error("quantity '{0}' is not a positive integer")]
    BadQuantity(String),
    /// The price field is not a non-negative number.
    #[error("price '{0}' is not a non-negative number")]
    BadPrice(String),
}
