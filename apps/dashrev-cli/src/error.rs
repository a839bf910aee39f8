//! CLI error types and exit codes

use dashrev_history::{ConfigError, HistoryError};
use thiserror::Error;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication required
/// - 3: Network error
/// - 4: Validation error
/// - 5: Server error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection failed: {0}\n\nTroubleshooting:\n  - Check your network connection\n  - Verify DASHREV_API_URL points at the API root\n  - Try again in a few moments")]
    ConnectionFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Restore aborted by user")]
    Aborted,
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Network(_) | CliError::ConnectionFailed(_) => 3,
            CliError::Validation(_) | CliError::NotFound(_) => 4,
            CliError::Server(_) => 5,
            CliError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
            CliError::Config(_) | CliError::InputError(_) => 1,
            CliError::Aborted => 0, // User chose to abort, not an error
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Config(_) => {
                Some("Set DASHREV_API_URL (or pass --api-url) to the dashboard server root.")
            }
            CliError::Api { status: 401, .. } | CliError::Api { status: 403, .. } => {
                Some("Check that DASHREV_API_TOKEN is a valid token with editor rights.")
            }
            CliError::NotFound(_) => Some("Run 'dashrev list --dashboard <ID>' to see versions."),
            _ => None,
        }
    }
}

impl From<HistoryError> for CliError {
    fn from(e: HistoryError) -> Self {
        match e {
            HistoryError::ConnectionFailed(msg) => CliError::ConnectionFailed(msg),
            HistoryError::Timeout => CliError::Network("Request timed out".to_string()),
            HistoryError::Network(msg) => CliError::Network(msg),
            HistoryError::Api {
                status: 404,
                message,
            } => CliError::NotFound(message),
            HistoryError::Api { status, message } => CliError::Api { status, message },
            HistoryError::Decode(msg) => CliError::Server(format!("Unexpected response: {msg}")),
            HistoryError::InvalidVersion(msg) => CliError::Validation(msg),
            HistoryError::Config(msg) => CliError::Config(msg),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InputError(format!("JSON error: {}", e))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::InputError(format!("Dialog error: {}", e))
    }
}
