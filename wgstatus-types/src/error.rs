//! Errors raised by model accessors and constructors.

use thiserror::Error;

/// Errors produced while constructing or reading model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The cluster carries no `version_updated_at` value.
    #[error("version update timestamp is missing")]
    MissingTimestamp,

    /// The epoch value cannot be represented as a calendar instant.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    /// A server status outside the closed `online`/`offline` set.
    #[error("unknown server status: {0:?}")]
    InvalidStatus(String),
}
