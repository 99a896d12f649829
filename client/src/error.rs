//! Error types for the Taskpad client.
//!
//! This module defines the crate-level error type and the TUI error type.
//! Request failures have their own type, [`ApiError`], in the `api` module;
//! view models turn those into user-visible strings and never propagate them.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can occur during client operations.
///
/// This is the primary error type for the client crate, encompassing the
/// failure modes that can stop the program (as opposed to request failures,
/// which the views absorb).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// I/O error (log file, terminal).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal could not be restored.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
