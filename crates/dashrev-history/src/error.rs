//! History client error types

use thiserror::Error;

/// Result alias used throughout the crate.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Error produced by a [`Transport`](crate::Transport) or by strict
/// version checking.
///
/// The history client never wraps or annotates these; a failure raised by
/// the transport reaches the caller as-is.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Could not reach the API.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Other network-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// API answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Restore was requested with a version that is not a number.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// Transport could not be built from its configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HistoryError {
    /// HTTP status carried by the error, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout | Self::Network(_)
        )
    }
}

impl From<reqwest::Error> for HistoryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            HistoryError::ConnectionFailed(e.to_string())
        } else if e.is_timeout() {
            HistoryError::Timeout
        } else if e.is_decode() {
            HistoryError::Decode(e.to_string())
        } else {
            HistoryError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        HistoryError::Decode(e.to_string())
    }
}
