//! HTTP clients for the task and AI backends.
//!
//! Both clients share one shape:
//!
//! - Connection pooling via a single `reqwest::Client` per API value
//! - JSON request and response bodies
//! - Transport failures and non-success statuses collapse into [`ApiError`]
//! - No retries; callers decide how a failure is shown
//!
//! The API values are cheap to clone, so the UI can hand a copy to every
//! spawned request.
//!
//! # Example
//!
//! ```no_run
//! use taskpad_client::api::TaskApi;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = TaskApi::new("http://localhost:8081/api/todos", None).unwrap();
//!     let tasks = api.list().await.unwrap();
//!     println!("{} tasks", tasks.len());
//! }
//! ```

mod assistant;
mod tasks;

use std::time::Duration;

use reqwest::{Client, Response};
use thiserror::Error;
use tracing::warn;

pub use assistant::AssistantApi;
pub use tasks::TaskApi;

/// Errors that can occur while talking to a backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Base URL cannot carry item paths.
    #[error("invalid base URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Builds the pooled HTTP client used by both APIs.
fn build_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder = Client::builder().pool_max_idle_per_host(10);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Passes a success response through; converts anything else to
/// [`ApiError::Status`] carrying the response body as the message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), message = %message, "Backend returned error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
