//! Widgets for the taskpad TUI.
//!
//! - [`header`]: app name, task counts, AI service status
//! - [`task_form`]: add-task inputs
//! - [`task_list`]: task rows and the error banner
//! - [`assistant_panel`]: assistant tabs, trigger, and results
//! - [`help_footer`]: key hints for the focused pane
//!
//! Widgets borrow state and theme and implement ratatui's
//! [`Widget`](ratatui::widgets::Widget) trait. The assistant panel is the
//! exception: it is a [`StatefulWidget`](ratatui::widgets::StatefulWidget)
//! over the result scroll position.

pub mod assistant_panel;
pub mod header;
pub mod help_footer;
pub mod task_form;
pub mod task_list;

pub use assistant_panel::AssistantPanelWidget;
pub use header::{HeaderWidget, StatusIndicatorWidget, HEADER_HEIGHT};
pub use help_footer::{HelpFooterWidget, HELP_FOOTER_HEIGHT};
pub use task_form::{TaskFormWidget, TASK_FORM_HEIGHT};
pub use task_list::TaskListWidget;
