//! Application configuration loaded from environment variables.
//!
//! The client core is configured entirely through the environment (with an
//! optional `.env` file for local development). Timeouts have defaults that
//! match the backend's expectations; only the API base URL is required.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Shared HTTP client timeout default (seconds).
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Bound on a single-shot location fix (seconds).
const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 30;
/// Dispatcher cooldown window after an alert attempt (seconds).
const DEFAULT_ALERT_COOLDOWN_SECS: u64 = 3;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. `https://api.alerta.example`
    pub api_base_url: String,
    /// Directory holding persisted key-value state (session, push token)
    pub state_dir: PathBuf,
    /// Shared timeout for all HTTP calls
    pub http_timeout: Duration,
    /// Bound on acquiring a location fix
    pub location_timeout: Duration,
    /// Cooldown held after every alert attempt before re-arming
    pub alert_cooldown: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("ALERTA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("ALERTA_API_URL"))?,
            state_dir: env::var("ALERTA_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_dir()),
            http_timeout: duration_from_env("ALERTA_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            location_timeout: duration_from_env(
                "ALERTA_LOCATION_TIMEOUT_SECS",
                DEFAULT_LOCATION_TIMEOUT_SECS,
            )?,
            alert_cooldown: duration_from_env(
                "ALERTA_ALERT_COOLDOWN_SECS",
                DEFAULT_ALERT_COOLDOWN_SECS,
            )?,
        })
    }

    /// Default config for tests: localhost backend, temp-friendly state dir,
    /// short cooldown so state-machine tests run quickly.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            state_dir: PathBuf::from(".alerta-test-state"),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            location_timeout: Duration::from_secs(DEFAULT_LOCATION_TIMEOUT_SECS),
            alert_cooldown: Duration::from_millis(50),
        }
    }
}

/// Platform data directory for persisted state, with a local fallback.
fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("alerta"))
        .unwrap_or_else(|| PathBuf::from(".alerta"))
}

fn duration_from_env(var: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid(var)),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
