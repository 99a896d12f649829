//! Taskpad - terminal client for a todo backend with an AI assistant.
//!
//! The client keeps a local cache of the server's task collection and
//! mirrors every change through the task REST API. A second panel calls
//! the AI backend for summaries, free-form answers, and per-task
//! categories, priorities, and recommendations.
//!
//! # Overview
//!
//! The server is authoritative: after any successful call the cache holds
//! exactly what the server returned, and a failed call leaves the cache as
//! it was with an error message set. Nothing is retried.
//!
//! # Modules
//!
//! - [`types`]: wire records for tasks and AI results
//! - [`api`]: HTTP clients for the task and AI backends
//! - [`task_list`]: the task list view model
//! - [`assistant`]: the AI assistant view model
//! - [`config`]: configuration from environment variables
//! - [`error`]: error types for client operations
//! - [`tui`]: terminal user interface

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod task_list;
pub mod tui;
pub mod types;

pub use api::{ApiError, AssistantApi, TaskApi};
pub use assistant::{AiAction, AiOutcome, AiRequest, AssistantState, AssistantTab};
pub use config::{Config, ConfigError};
pub use error::{ClientError, Result, TuiError};
pub use task_list::{TaskList, TaskOutcome, TaskRequest, TaskTitles};
pub use types::{
    AiAnswer, AnalysisItem, AnalysisKind, NewTask, PriorityLevel, Task, TaskId, Timestamp,
};
