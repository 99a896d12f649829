//! Single-line footer with key hints for the focused pane.
//!
//! Hints are dropped from the right when the terminal is too narrow to show
//! them all.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::app::{Focus, Theme};

pub const HELP_FOOTER_HEIGHT: u16 = 1;

const SEPARATOR: &str = "  ";

/// Key hints as (key, action) pairs for `focus`.
#[must_use]
pub fn hints(focus: Focus) -> &'static [(&'static str, &'static str)] {
    match focus {
        Focus::TaskList => &[
            ("j/k", "move"),
            ("space", "toggle"),
            ("d", "delete"),
            ("a", "add"),
            ("r", "reload"),
            ("tab", "focus"),
            ("h", "health"),
            ("q", "quit"),
        ],
        Focus::TitleInput | Focus::DescriptionInput => &[
            ("enter", "add task"),
            ("tab", "next field"),
            ("esc", "back"),
            ("ctrl+c", "quit"),
        ],
        Focus::Assistant => &[
            ("1-5", "tab"),
            ("enter", "run"),
            ("j/k", "scroll"),
            ("tab", "focus"),
            ("h", "health"),
            ("q", "quit"),
        ],
        Focus::QuestionInput => &[("enter", "ask"), ("esc", "back"), ("ctrl+c", "quit")],
    }
}

#[derive(Debug)]
pub struct HelpFooterWidget<'a> {
    focus: Focus,
    theme: &'a Theme,
}

impl<'a> HelpFooterWidget<'a> {
    #[must_use]
    pub fn new(focus: Focus, theme: &'a Theme) -> Self {
        Self { focus, theme }
    }

    fn hint_line(&self, available_width: usize) -> Line<'a> {
        let mut spans = Vec::new();
        let mut used = 0;

        for (i, (key, action)) in hints(self.focus).iter().enumerate() {
            let sep = if i == 0 { 0 } else { SEPARATOR.len() };
            let width = sep + key.len() + 1 + action.len();
            if used + width > available_width {
                break;
            }
            if sep > 0 {
                spans.push(Span::raw(SEPARATOR));
            }
            spans.push(Span::styled(*key, self.theme.label));
            spans.push(Span::styled(format!(" {action}"), self.theme.text_muted));
            used += width;
        }
        Line::from(spans)
    }
}

impl Widget for HelpFooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.hint_line(area.width as usize).render(area, buf);
    }
}
