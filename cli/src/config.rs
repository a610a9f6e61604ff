//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use agricompass::net::api::DEFAULT_BACKEND_URL;

pub const DEFAULT_SESSION_FILE: &str = ".agricompass/session.json";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid backend URL `{0}` (expected http:// or https://)")]
    InvalidBackendUrl(String),
    #[error("invalid {key}: `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub session_file: PathBuf,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `AGRICOMPASS_BACKEND_URL`: default `http://localhost:8000`
    /// - `AGRICOMPASS_SESSION_FILE`: default `.agricompass/session.json`
    /// - `AGRICOMPASS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-HTTP backend URL or a timeout
    /// that is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = normalize_backend_url(
            std::env::var("AGRICOMPASS_BACKEND_URL")
                .as_deref()
                .unwrap_or(DEFAULT_BACKEND_URL),
        )?;
        let session_file = std::env::var_os("AGRICOMPASS_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);
        let connect_timeout = Duration::from_secs(env_parse_u64(
            "AGRICOMPASS_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?);

        Ok(Self { backend_url, session_file, connect_timeout })
    }

    /// Override the backend URL, applying the same validation as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackendUrl`] for a non-HTTP URL.
    pub fn with_backend_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.backend_url = normalize_backend_url(raw)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes; require an HTTP scheme. An empty
/// value falls back to the default, matching an unset variable.
fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BACKEND_URL.to_owned());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBackendUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
