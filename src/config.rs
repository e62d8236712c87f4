//! Process configuration, read once from the environment at startup.
//!
//! The configuration is an immutable value constructed in `main` and passed
//! by handle into every component that needs it. Nothing reads the
//! environment after startup.
//!
//! # Variables
//!
//! - `PORT` - listening port (optional, default 8080)
//! - `REMOTE_URL` - job-info URL template containing `{key}` (required)
//! - `WEBHOOK_URL` - downstream webhook URL (required)
//! - `POLL_INTERVAL` - poll/retry interval in whole seconds (required)
//! - `REQUEST_TIMEOUT_SECS` - outbound request timeout (optional, default 30)

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::types::JobKey;

/// Placeholder in the `REMOTE_URL` template that is substituted with the
/// job key when building a status request.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Default listening port when `PORT` is not set.
const DEFAULT_PORT: u16 = 8080;

/// Default outbound request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that make the process refuse to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// An environment variable holds a value that does not parse as a number.
    #[error("invalid value for {var}: {value:?} is not a number")]
    InvalidNumber { var: &'static str, value: String },

    /// The remote URL template has nowhere to substitute the job key.
    #[error("REMOTE_URL must contain the {{key}} placeholder: {0:?}")]
    MissingKeyPlaceholder(String),
}

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,

    /// URL template for the remote job-info endpoint. Contains `{key}`.
    pub remote_url: String,

    /// URL completion notifications are POSTed to.
    pub webhook_url: String,

    /// Fixed delay between poll attempts and between delivery retries.
    pub poll_interval: Duration,

    /// Timeout applied to every outbound poll and delivery request, so a
    /// watch task cannot stall forever on a hung remote endpoint.
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests supply a map instead of mutating the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => parse_number::<u16>("PORT", &value)?,
            None => {
                info!("using default value for PORT: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let remote_url = lookup("REMOTE_URL").ok_or(ConfigError::Missing("REMOTE_URL"))?;
        if !remote_url.contains(KEY_PLACEHOLDER) {
            return Err(ConfigError::MissingKeyPlaceholder(remote_url));
        }

        let webhook_url = lookup("WEBHOOK_URL").ok_or(ConfigError::Missing("WEBHOOK_URL"))?;

        let interval_secs = lookup("POLL_INTERVAL")
            .ok_or(ConfigError::Missing("POLL_INTERVAL"))
            .and_then(|value| parse_number("POLL_INTERVAL", &value))?;

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => parse_number("REQUEST_TIMEOUT_SECS", &value)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            port,
            remote_url,
            webhook_url,
            poll_interval: Duration::from_secs(interval_secs),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds the job-info URL for a specific key.
    pub fn status_url(&self, key: &JobKey) -> String {
        self.remote_url.replace(KEY_PLACEHOLDER, key.as_str())
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}
