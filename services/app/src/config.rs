//! services/app/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub log_level: Level,
    /// Maximum age of the reference-material cache before a refresh.
    pub reference_ttl: Duration,
    /// Maximum age of a report-status entry before a re-check.
    pub report_ttl: Duration,
    /// Input-stability window before the conflict advisory is computed.
    pub advisory_debounce: Duration,
    /// Minimum activity duration accepted by the form, in minutes.
    pub min_activity_minutes: i64,
    /// Transport timeout; generous to allow multipart uploads.
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url = std::env::var("API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("API_BASE_URL".to_string()))?;
        let api_token = std::env::var("API_TOKEN").ok();

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let reference_ttl =
            Duration::from_secs(60 * parse_var("REFERENCE_TTL_MINUTES", 10)?);
        let report_ttl = Duration::from_secs(parse_var("REPORT_TTL_SECONDS", 120)?);
        let advisory_debounce =
            Duration::from_millis(parse_var("ADVISORY_DEBOUNCE_MS", 1_000)?);
        let min_activity_minutes =
            parse_var("MIN_ACTIVITY_MINUTES", 45)? as i64;
        let request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECONDS", 120)?);

        Ok(Self {
            api_base_url,
            api_token,
            log_level,
            reference_ttl,
            report_ttl,
            advisory_debounce,
            min_activity_minutes,
            request_timeout,
        })
    }
}

impl Default for Config {
    /// The built-in defaults, used when no environment overrides apply
    /// (primarily in tests).
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: None,
            log_level: Level::INFO,
            reference_ttl: Duration::from_secs(10 * 60),
            report_ttl: Duration::from_secs(2 * 60),
            advisory_debounce: Duration::from_millis(1_000),
            min_activity_minutes: 45,
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Parses a numeric environment variable, falling back to `default` when the
/// variable is unset.
fn parse_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                name.to_string(),
                format!("'{}' is not a valid number", raw),
            )
        }),
    }
}
