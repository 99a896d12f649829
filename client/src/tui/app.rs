//! Application state and event management for the taskpad TUI.
//!
//! The main types are:
//!
//! - [`AppState`]: everything the renderer reads, owned by the UI loop
//! - [`TuiEvent`]: events that drive the loop, from the terminal and from
//!   completed backend requests
//! - [`EventHandler`]: async producer of terminal and tick events using
//!   `tokio::select!`
//! - [`Theme`] and [`Symbols`]: styling, with `NO_COLOR` and ASCII fallbacks
//!
//! # Architecture
//!
//! The UI loop is the only place view state is mutated. Key presses are
//! turned into local edits and, when needed, an [`Effect`] describing a
//! backend request. Requests run in spawned tasks and report back as
//! [`TuiEvent::TaskCompleted`], [`TuiEvent::AssistantCompleted`] or
//! [`TuiEvent::HealthChecked`], which are applied in arrival order.
//!
//! ```text
//! EventHandler --Key/Tick--> loop --Effect--> tokio::spawn(request)
//!                              ^                         |
//!                              +----- *Completed event --+
//! ```

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};

use crate::assistant::{AiOutcome, AiRequest, AssistantState, AssistantTab};
use crate::task_list::{TaskList, TaskOutcome, TaskRequest, TaskTitles};
use crate::types::{PriorityLevel, Task};

// =============================================================================
// Focus and form state
// =============================================================================

/// Which part of the screen receives key presses.
///
/// `Tab` cycles through title input, description input, task list and
/// assistant. The question input is entered from the Q&A tab and behaves
/// like the assistant pane for cycling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    TitleInput,
    DescriptionInput,
    #[default]
    TaskList,
    Assistant,
    QuestionInput,
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Focus::TitleInput => Focus::DescriptionInput,
            Focus::DescriptionInput => Focus::TaskList,
            Focus::TaskList => Focus::Assistant,
            Focus::Assistant | Focus::QuestionInput => Focus::TitleInput,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Focus::TitleInput => Focus::Assistant,
            Focus::DescriptionInput => Focus::TitleInput,
            Focus::TaskList => Focus::DescriptionInput,
            Focus::Assistant | Focus::QuestionInput => Focus::TaskList,
        }
    }

    /// Returns `true` if typed characters go into a text input.
    #[must_use]
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            Focus::TitleInput | Focus::DescriptionInput | Focus::QuestionInput
        )
    }
}

/// Drafts of the add-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub description: String,
}

impl AddForm {
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

const TAB_COUNT: usize = AssistantTab::ALL.len();

/// Scroll position of the assistant result area, kept per tab.
///
/// The renderer records how far each tab can scroll on every draw and pulls
/// the offset back within that limit, the way ratatui's `ListState` is
/// adjusted during rendering. Before a tab is first drawn its limit is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultScroll {
    offsets: [u16; TAB_COUNT],
    limits: [u16; TAB_COUNT],
}

impl ResultScroll {
    /// First visible row of `tab`'s result.
    #[must_use]
    pub fn offset(&self, tab: AssistantTab) -> u16 {
        self.offsets[tab.index()]
    }

    /// Largest offset that still fills the area, as of the last draw.
    #[must_use]
    pub fn limit(&self, tab: AssistantTab) -> u16 {
        self.limits[tab.index()]
    }

    pub fn scroll_down(&mut self, tab: AssistantTab, rows: u16) {
        let i = tab.index();
        self.offsets[i] = self.offsets[i].saturating_add(rows).min(self.limits[i]);
    }

    pub fn scroll_up(&mut self, tab: AssistantTab, rows: u16) {
        let i = tab.index();
        self.offsets[i] = self.offsets[i].saturating_sub(rows);
    }

    /// Jumps back to the first row.
    pub fn reset(&mut self, tab: AssistantTab) {
        self.offsets[tab.index()] = 0;
    }

    pub fn set_limit(&mut self, tab: AssistantTab, limit: u16) {
        let i = tab.index();
        self.limits[i] = limit;
        self.offsets[i] = self.offsets[i].min(limit);
    }
}

/// AI service health as shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// Not checked yet.
    #[default]
    Unknown,
    /// A health check is in flight.
    Checking,
    /// The health endpoint answered with a success status.
    Connected,
    /// The health endpoint failed or answered with an error status.
    Error,
}

// =============================================================================
// Theme and symbols
// =============================================================================

/// Color theme for the TUI.
///
/// Use [`Theme::from_env`] to honour `NO_COLOR`.
///
/// # Example
///
/// ```
/// use taskpad_client::tui::app::Theme;
///
/// let theme = Theme::default();
/// let mono = Theme::monochrome();
/// assert_ne!(theme.priority_high, mono.priority_high);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Status indicators
    pub status_connected: Style,
    pub status_error: Style,
    pub status_checking: Style,
    pub status_unknown: Style,

    // Tasks
    pub task_pending: Style,
    pub task_done: Style,
    pub task_description: Style,
    pub task_timestamp: Style,
    pub task_selected: Style,

    // Assistant
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub trigger: Style,
    pub trigger_busy: Style,
    pub badge: Style,
    pub priority_high: Style,
    pub priority_medium: Style,
    pub priority_low: Style,
    pub ai_result: Style,

    // Form
    pub input_focused: Style,
    pub input_unfocused: Style,
    pub placeholder: Style,
    pub error: Style,
    pub label: Style,

    // Layout
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub text_primary: Style,
    pub text_secondary: Style,
    pub text_muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_connected: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_checking: Style::default().fg(Color::Yellow),
            status_unknown: Style::default().fg(Color::DarkGray),

            task_pending: Style::default(),
            task_done: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            task_description: Style::default().fg(Color::Gray),
            task_timestamp: Style::default().fg(Color::DarkGray),
            task_selected: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),
            trigger: Style::default().fg(Color::Black).bg(Color::Cyan),
            trigger_busy: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            badge: Style::default().fg(Color::Black).bg(Color::Magenta),
            priority_high: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            priority_medium: Style::default().fg(Color::Black).bg(Color::Yellow),
            priority_low: Style::default().fg(Color::Black).bg(Color::Green),
            ai_result: Style::default().fg(Color::White),

            input_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            input_unfocused: Style::default().fg(Color::Gray),
            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::White),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a modifier-only theme for terminals with color disabled.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            status_connected: Style::default().add_modifier(Modifier::BOLD),
            status_error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            status_checking: Style::default().add_modifier(Modifier::ITALIC),
            status_unknown: Style::default().add_modifier(Modifier::DIM),

            task_pending: Style::default(),
            task_done: Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            task_description: Style::default().add_modifier(Modifier::DIM),
            task_timestamp: Style::default().add_modifier(Modifier::DIM),
            task_selected: Style::default().add_modifier(Modifier::REVERSED),

            tab_active: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default(),
            trigger: Style::default().add_modifier(Modifier::REVERSED),
            trigger_busy: Style::default().add_modifier(Modifier::ITALIC),
            badge: Style::default().add_modifier(Modifier::REVERSED),
            priority_high: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            priority_medium: Style::default().add_modifier(Modifier::REVERSED),
            priority_low: Style::default().add_modifier(Modifier::DIM | Modifier::REVERSED),
            ai_result: Style::default(),

            input_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            input_unfocused: Style::default().add_modifier(Modifier::DIM),
            placeholder: Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            error: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),

            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Returns [`Theme::monochrome`] if `NO_COLOR` is set, the default otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }

    /// Badge style for a priority payload.
    #[must_use]
    pub fn priority(&self, level: PriorityLevel) -> Style {
        match level {
            PriorityLevel::High => self.priority_high,
            PriorityLevel::Medium => self.priority_medium,
            PriorityLevel::Low => self.priority_low,
            PriorityLevel::Unknown => self.badge,
        }
    }

    #[must_use]
    pub fn status(&self, status: ConnectionStatus) -> Style {
        match status {
            ConnectionStatus::Connected => self.status_connected,
            ConnectionStatus::Error => self.status_error,
            ConnectionStatus::Checking => self.status_checking,
            ConnectionStatus::Unknown => self.status_unknown,
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
///
/// ```
/// use taskpad_client::tui::app::{ASCII_SYMBOLS, UNICODE_SYMBOLS};
///
/// assert_eq!(UNICODE_SYMBOLS.connected, "●");
/// assert_eq!(ASCII_SYMBOLS.unchecked, "[ ]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub connected: &'static str,
    pub disconnected: &'static str,
    pub checking: &'static str,
    pub unknown: &'static str,
    pub checked: &'static str,
    pub unchecked: &'static str,
    pub selector: &'static str,
    pub arrow: &'static str,
    pub bullet: &'static str,
}

pub const UNICODE_SYMBOLS: Symbols = Symbols {
    connected: "●",
    disconnected: "○",
    checking: "◔",
    unknown: "◌",
    checked: "☑",
    unchecked: "☐",
    selector: "▶",
    arrow: "→",
    bullet: "•",
};

pub const ASCII_SYMBOLS: Symbols = Symbols {
    connected: "[*]",
    disconnected: "[ ]",
    checking: "[.]",
    unknown: "[?]",
    checked: "[x]",
    unchecked: "[ ]",
    selector: ">",
    arrow: "->",
    bullet: "*",
};

impl Symbols {
    /// ASCII on the Linux console and VT100 terminals, unicode elsewhere.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }

    #[must_use]
    pub fn status(&self, status: ConnectionStatus) -> &'static str {
        match status {
            ConnectionStatus::Connected => self.connected,
            ConnectionStatus::Error => self.disconnected,
            ConnectionStatus::Checking => self.checking,
            ConnectionStatus::Unknown => self.unknown,
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

// =============================================================================
// Application state
// =============================================================================

/// A backend request produced by input handling, to be spawned by the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Task(TaskRequest),
    Assistant(AiRequest),
    CheckHealth,
}

/// Central state container for the TUI.
///
/// # Example
///
/// ```
/// use taskpad_client::tui::app::{AppState, Focus};
///
/// let mut state = AppState::new();
/// assert_eq!(state.focus, Focus::TaskList);
/// assert!(!state.should_quit());
///
/// state.quit();
/// assert!(state.should_quit());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tasks: TaskList,
    pub assistant: AssistantState,

    /// Title snapshot handed to the assistant pane; refreshed whenever the
    /// task list changes.
    pub titles: TaskTitles,

    /// Index of the highlighted task.
    pub selected: usize,
    pub focus: Focus,
    pub form: AddForm,
    pub result_scroll: ResultScroll,
    pub ai_status: ConnectionStatus,

    pub should_quit: bool,
    pub theme: Theme,
    pub symbols: Symbols,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The highlighted task, if the list is not empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.tasks().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Applies a finished task request and refreshes the title snapshot.
    ///
    /// A successful create also clears the add form.
    pub fn apply_task_outcome(&mut self, outcome: TaskOutcome) {
        let created = matches!(outcome, TaskOutcome::Created(Ok(_)));
        if self.tasks.apply(outcome) && created {
            self.form.clear();
            self.selected = 0;
        }
        self.titles = self.tasks.titles();
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    /// Applies a finished assistant request.
    ///
    /// New content starts scrolled to the top. A failed analysis leaves its
    /// previous results and their scroll position alone.
    pub fn apply_ai_outcome(&mut self, outcome: AiOutcome) {
        let action = outcome.action();
        let keeps_results = action.analysis_kind().is_some() && outcome.error().is_some();
        if !keeps_results {
            self.result_scroll.reset(AssistantTab::from(action));
        }
        self.assistant.apply(outcome);
    }
}

// =============================================================================
// Events
// =============================================================================

/// Events that drive the TUI event loop.
#[derive(Debug)]
pub enum TuiEvent {
    /// Periodic tick, used to redraw busy indicators.
    Tick,

    /// Key press from the terminal.
    Key(KeyEvent),

    /// Terminal resized to (columns, rows).
    Resize(u16, u16),

    /// A task backend request finished.
    TaskCompleted(TaskOutcome),

    /// An AI backend request finished.
    AssistantCompleted(AiOutcome),

    /// An AI health check finished.
    HealthChecked(ConnectionStatus),
}

/// Default tick rate for the event handler.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Poll timeout for terminal input.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// Produces terminal input and periodic tick events.
///
/// Runs in its own task and multiplexes a shutdown signal, a tick interval
/// and blocking terminal polls with a biased `tokio::select!`. Terminal
/// polling happens on `spawn_blocking` so the runtime is never blocked.
///
/// ```ignore
/// let (event_tx, mut event_rx) = mpsc::channel(100);
/// let (shutdown_tx, shutdown_rx) = oneshot::channel();
///
/// let handler = EventHandler::new(event_tx, shutdown_rx);
/// let task = tokio::spawn(handler.run());
///
/// while let Some(event) = event_rx.recv().await {
///     // ...
/// }
///
/// let _ = shutdown_tx.send(());
/// ```
#[derive(Debug)]
pub struct EventHandler {
    event_tx: mpsc::Sender<TuiEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self::with_tick_rate(
            event_tx,
            shutdown_rx,
            Duration::from_millis(DEFAULT_TICK_RATE_MS),
        )
    }

    pub fn with_tick_rate(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Runs until a shutdown signal arrives or the receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking poll task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    tracing::debug!("EventHandler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        tracing::debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }

                result = async {
                    tokio::time::sleep(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        Self::poll_terminal_event(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS))
                    }).await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                tracing::debug!("Event receiver dropped, exiting event loop");
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            tracing::error!("spawn_blocking task panicked: {}", join_error);
                            return Err(std::io::Error::other("Terminal polling task panicked"));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Polls for one terminal event. Poll failures (no terminal, as in tests)
    /// read as "no event".
    fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(crossterm_event) => Self::convert_crossterm_event(crossterm_event),
                Err(e) => {
                    tracing::trace!("Failed to read terminal event: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::trace!("Failed to poll terminal: {}", e);
                None
            }
        }
    }

    fn convert_crossterm_event(event: CrosstermEvent) -> Option<TuiEvent> {
        match event {
            CrosstermEvent::Key(key_event) => Some(TuiEvent::Key(key_event)),
            CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            CrosstermEvent::Mouse(_)
            | CrosstermEvent::FocusGained
            | CrosstermEvent::FocusLost
            | CrosstermEvent::Paste(_) => None,
        }
    }
}
