//! Add-task form: a title input and an optional description input.
//!
//! ```text
//! ┌ Add Task ──────────────────────────┐
//! │ Title: Buy milk_                   │
//! │ Desc:  Description (optional)...   │
//! └────────────────────────────────────┘
//! ```
//!
//! The focused input shows a trailing `_` cursor. Empty inputs show a
//! placeholder.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::app::{AddForm, Focus, Theme};

/// Height of the form in rows, borders included.
pub const TASK_FORM_HEIGHT: u16 = 4;

const TITLE_LABEL: &str = "Title: ";
const DESCRIPTION_LABEL: &str = "Desc:  ";
const TITLE_PLACEHOLDER: &str = "Todo title...";
const DESCRIPTION_PLACEHOLDER: &str = "Description (optional)...";

#[derive(Debug)]
pub struct TaskFormWidget<'a> {
    form: &'a AddForm,
    focus: Focus,
    theme: &'a Theme,
}

impl<'a> TaskFormWidget<'a> {
    #[must_use]
    pub fn new(form: &'a AddForm, focus: Focus, theme: &'a Theme) -> Self {
        Self { form, focus, theme }
    }

    fn is_focused(&self) -> bool {
        matches!(self.focus, Focus::TitleInput | Focus::DescriptionInput)
    }

    fn input_line(
        &self,
        label: &'static str,
        value: &'a str,
        placeholder: &'static str,
        focused: bool,
    ) -> Line<'a> {
        let label_style = if focused {
            self.theme.label.add_modifier(Modifier::BOLD)
        } else {
            self.theme.label
        };

        let mut spans = vec![Span::styled(label, label_style)];
        if value.is_empty() && !focused {
            spans.push(Span::styled(placeholder, self.theme.placeholder));
        } else {
            let style = if focused {
                self.theme.input_focused
            } else {
                self.theme.input_unfocused
            };
            spans.push(Span::styled(value, style));
        }
        if focused {
            spans.push(Span::styled("_", self.theme.input_focused));
        }
        Line::from(spans)
    }
}

impl Widget for TaskFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border_style = if self.is_focused() {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Add Task ")
            .title_style(self.theme.title);

        let lines = vec![
            self.input_line(
                TITLE_LABEL,
                &self.form.title,
                TITLE_PLACEHOLDER,
                self.focus == Focus::TitleInput,
            ),
            self.input_line(
                DESCRIPTION_LABEL,
                &self.form.description,
                DESCRIPTION_PLACEHOLDER,
                self.focus == Focus::DescriptionInput,
            ),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
