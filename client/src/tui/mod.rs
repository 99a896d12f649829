//! Terminal user interface.
//!
//! Built with [`ratatui`] on a crossterm backend. Two panes share the
//! screen: the task list with its add form, and the AI assistant.
//!
//! # Submodules
//!
//! - [`app`]: application state, theme, events, and the terminal event producer
//! - [`input`]: key handling, turning key presses into requests
//! - [`runner`]: the event loop and request dispatch
//! - [`terminal`]: terminal setup and cleanup with panic handling
//! - [`ui`]: frame layout
//! - [`widgets`]: the individual panes

pub mod app;
pub mod input;
pub mod runner;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{AppState, ConnectionStatus, Effect, TuiEvent};
pub use runner::{run, Dispatcher};
pub use terminal::{install_panic_hook, Tui};
