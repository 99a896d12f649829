//! Header bar: app name, task counts, and AI service status.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ taskpad   3 pending · 2 done                    ● AI Connected│
//! └──────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::app::{ConnectionStatus, Symbols, Theme};

/// Height of the header in rows, borders included.
pub const HEADER_HEIGHT: u16 = 3;

const APP_NAME: &str = "taskpad";

/// AI service status indicator: symbol plus label, right-aligned.
#[derive(Debug)]
pub struct StatusIndicatorWidget<'a> {
    status: ConnectionStatus,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> StatusIndicatorWidget<'a> {
    #[must_use]
    pub fn new(status: ConnectionStatus, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            status,
            theme,
            symbols,
        }
    }

    fn status_text(&self) -> &'static str {
        match self.status {
            ConnectionStatus::Connected => "AI Connected",
            ConnectionStatus::Error => "AI Error",
            ConnectionStatus::Checking => "AI Checking...",
            ConnectionStatus::Unknown => "AI Unknown",
        }
    }

    /// Display width in columns (symbol + space + text).
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.symbols.status(self.status).chars().count() + 1 + self.status_text().len()
    }
}

impl Widget for StatusIndicatorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = self.theme.status(self.status);
        let line = Line::from(vec![
            Span::styled(self.symbols.status(self.status), style),
            Span::raw(" "),
            Span::styled(self.status_text(), style),
        ])
        .right_aligned();
        line.render(area, buf);
    }
}

/// The top bar of the screen.
#[derive(Debug)]
pub struct HeaderWidget<'a> {
    pending: usize,
    completed: usize,
    loading: bool,
    status: ConnectionStatus,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> HeaderWidget<'a> {
    #[must_use]
    pub fn new(status: ConnectionStatus, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            pending: 0,
            completed: 0,
            loading: false,
            status,
            theme,
            symbols,
        }
    }

    /// Sets the task counts shown next to the app name.
    #[must_use]
    pub fn with_counts(mut self, pending: usize, completed: usize) -> Self {
        self.pending = pending;
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn summary_line(&self) -> Line<'a> {
        let counts = if self.loading {
            Span::styled("loading...", self.theme.text_muted)
        } else {
            Span::styled(
                format!("{} pending {} {} done", self.pending, self.symbols.bullet, self.completed),
                self.theme.text_secondary,
            )
        };

        Line::from(vec![
            Span::styled(APP_NAME, self.theme.title),
            Span::styled("   ", Style::default()),
            counts,
        ])
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let indicator = StatusIndicatorWidget::new(self.status, self.theme, self.symbols);
        let status_width = (indicator.display_width() as u16 + 1).min(inner.width / 2);
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(status_width)])
                .areas(inner);

        Paragraph::new(self.summary_line()).render(left, buf);
        indicator.render(right, buf);
    }
}
