//! Client configuration
//!
//! Connection settings for [`HttpTransport`](crate::HttpTransport),
//! loaded from environment variables.

use std::fmt;
use std::time::Duration;
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the versioning API.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root. Always ends with `/` so relative paths join beneath it.
    pub api_url: Url,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Reject non-numeric restore versions instead of skipping them.
    pub strict_versions: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("strict_versions", &self.strict_versions)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration for `api_url` with default settings.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url("DASHREV_API_URL", api_url)?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_versions: false,
        })
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// Lets tests supply variables without touching the process
    /// environment.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let api_url = reader("DASHREV_API_URL")
            .map_err(|_| ConfigError::MissingVar("DASHREV_API_URL".into()))?;
        let api_url = parse_api_url("DASHREV_API_URL", &api_url)?;

        let api_token = reader("DASHREV_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timeout_secs = reader("DASHREV_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue("DASHREV_TIMEOUT_SECS".into(), e.to_string()))?;
        check_timeout("DASHREV_TIMEOUT_SECS", timeout_secs)?;

        let strict_versions = reader("DASHREV_STRICT_VERSIONS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidValue("DASHREV_STRICT_VERSIONS".into(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            api_token,
            timeout_secs,
            strict_versions,
        })
    }

    /// Replace the API root.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url("api_url", api_url)?;
        Ok(self)
    }

    /// Set the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout. Zero is rejected.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Result<Self, ConfigError> {
        check_timeout("timeout_secs", timeout_secs)?;
        self.timeout_secs = timeout_secs;
        Ok(self)
    }

    /// Toggle strict restore version checking.
    pub fn with_strict_versions(mut self, strict: bool) -> Self {
        self.strict_versions = strict;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn check_timeout(name: &str, timeout_secs: u64) -> Result<(), ConfigError> {
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidValue(
            name.to_string(),
            "must be greater than zero".into(),
        ));
    }
    Ok(())
}

fn parse_api_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("unsupported scheme: {scheme}"),
        )),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
