//! Error types for fetching and normalizing status data.

use thiserror::Error;
use wgstatus_types::ModelError;

/// Errors that can occur while polling and normalizing the status feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// HTTP request failed below the status-code level.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Connection to the upstream host failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Upstream answered with a non-2xx status.
    #[error("API returned status {code}")]
    BadStatus { code: u16 },

    /// Response body is not JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The top-level `results` envelope has the wrong shape.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// A required field is absent from a record.
    #[error("{entity} is missing required field `{field}`")]
    MissingRequiredField {
        entity: &'static str,
        field: &'static str,
    },

    /// A record could not be read, e.g. a field has the wrong JSON type.
    #[error("invalid {entity} record: {reason}")]
    InvalidRecord {
        entity: &'static str,
        reason: String,
    },

    /// A value failed model validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StatusError {
    /// Whether repeating the poll later may succeed without an upstream fix.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StatusError::Transport(_)
                | StatusError::Connection(_)
                | StatusError::Timeout
                | StatusError::BadStatus { .. }
        )
    }
}

impl From<reqwest::Error> for StatusError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so query-string credentials never reach logs.
        let err = err.without_url();
        if err.is_timeout() {
            StatusError::Timeout
        } else if err.is_connect() {
            StatusError::Connection(err.to_string())
        } else {
            StatusError::Transport(err.to_string())
        }
    }
}
