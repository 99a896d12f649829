//! Configuration module for Taskpad.
//!
//! This module handles parsing configuration from environment variables.
//! Backend locations are injected here at startup instead of being baked
//! into the binary; the CLI can override both URLs.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TASKPAD_TASKS_URL` | No | `http://localhost:8081/api/todos` | Task backend base URL |
//! | `TASKPAD_AI_URL` | No | `http://localhost:8081/api/ai` | AI backend base URL |
//! | `TASKPAD_REQUEST_TIMEOUT_SECS` | No | (none) | Per-request timeout in seconds |
//! | `TASKPAD_LOG_DIR` | No | `~/.taskpad` | Directory for the TUI log file |
//!
//! # Example
//!
//! ```no_run
//! use taskpad_client::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("Tasks URL: {}", config.tasks_url);
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use reqwest::Url;
use thiserror::Error;

/// Default task backend base URL.
pub const DEFAULT_TASKS_URL: &str = "http://localhost:8081/api/todos";

/// Default AI backend base URL.
pub const DEFAULT_AI_URL: &str = "http://localhost:8081/api/ai";

/// Default log directory name relative to home.
const DEFAULT_LOG_DIR: &str = ".taskpad";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable or flag has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for the Taskpad client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the task backend (e.g., `http://localhost:8081/api/todos`).
    pub tasks_url: String,

    /// Base URL of the AI backend (e.g., `http://localhost:8081/api/ai`).
    pub ai_url: String,

    /// Optional timeout applied to every HTTP request.
    /// If `None`, requests wait until the server answers or the connection drops.
    pub request_timeout: Option<Duration>,

    /// Directory where the interactive UI writes its log file.
    pub log_dir: PathBuf,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `TASKPAD_TASKS_URL` or `TASKPAD_AI_URL` is not an `http`/`https` URL
    /// - `TASKPAD_REQUEST_TIMEOUT_SECS` is not a positive integer
    /// - The home directory cannot be determined and `TASKPAD_LOG_DIR` is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let tasks_url = match env::var("TASKPAD_TASKS_URL") {
            Ok(val) => parse_base_url("TASKPAD_TASKS_URL", &val)?,
            Err(_) => DEFAULT_TASKS_URL.to_string(),
        };

        let ai_url = match env::var("TASKPAD_AI_URL") {
            Ok(val) => parse_base_url("TASKPAD_AI_URL", &val)?,
            Err(_) => DEFAULT_AI_URL.to_string(),
        };

        // Optional: TASKPAD_REQUEST_TIMEOUT_SECS (default: no timeout, must be > 0)
        let request_timeout = match env::var("TASKPAD_REQUEST_TIMEOUT_SECS") {
            Ok(val) => {
                let secs = val
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "TASKPAD_REQUEST_TIMEOUT_SECS".to_string(),
                        message: format!("expected positive integer, got '{val}'"),
                    })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "TASKPAD_REQUEST_TIMEOUT_SECS".to_string(),
                        message: "timeout must be at least 1 second".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let log_dir = match env::var("TASKPAD_LOG_DIR") {
            Ok(val) => PathBuf::from(val),
            Err(_) => {
                let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
                base_dirs.home_dir().join(DEFAULT_LOG_DIR)
            }
        };

        Ok(Self {
            tasks_url,
            ai_url,
            request_timeout,
            log_dir,
        })
    }

    /// Replaces the task backend URL, validating it the same way as the
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is not `http`/`https`.
    pub fn with_tasks_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.tasks_url = parse_base_url("--tasks-url", url)?;
        Ok(self)
    }

    /// Replaces the AI backend URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is not `http`/`https`.
    pub fn with_ai_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.ai_url = parse_base_url("--ai-url", url)?;
        Ok(self)
    }
}

/// Validates a base URL and strips trailing slashes so paths can be appended.
fn parse_base_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{trimmed}' is not a valid URL: {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected http or https URL, got scheme '{}'", url.scheme()),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
