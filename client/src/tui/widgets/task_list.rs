//! Task list pane with the error banner.
//!
//! ```text
//! ┌ Tasks ───────────────────────────────┐
//! │ Failed to update task                │
//! │ > [ ] Buy milk        2024-01-01 09:00│
//! │       2 litres                       │
//! │   [x] Walk dog        2024-01-01 08:00│
//! └──────────────────────────────────────┘
//! ```
//!
//! Each task takes one row, plus one for a non-blank description. The view
//! scrolls to keep the selected task visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::task_list::TaskList;
use crate::tui::app::{Symbols, Theme};
use crate::types::Task;

const LOADING_TEXT: &str = "Loading...";
const EMPTY_TEXT: &str = "No tasks yet. Add one above!";

#[derive(Debug)]
pub struct TaskListWidget<'a> {
    tasks: &'a TaskList,
    selected: usize,
    focused: bool,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> TaskListWidget<'a> {
    #[must_use]
    pub fn new(tasks: &'a TaskList, theme: &'a Theme, symbols: &'a Symbols) -> Self {
        Self {
            tasks,
            selected: 0,
            focused: false,
            theme,
            symbols,
        }
    }

    #[must_use]
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Lines for one task. The first line is the title row.
    fn task_lines(&self, task: &'a Task, is_selected: bool) -> Vec<Line<'a>> {
        let marker = if is_selected && self.focused {
            self.symbols.selector
        } else {
            " "
        };
        let checkbox = if task.completed {
            self.symbols.checked
        } else {
            self.symbols.unchecked
        };
        let title_style = if task.completed {
            self.theme.task_done
        } else {
            self.theme.task_pending
        };

        let mut title = vec![
            Span::raw(format!("{marker} ")),
            Span::styled(checkbox, title_style),
            Span::raw(" "),
            Span::styled(task.title.as_str(), title_style),
        ];
        if let Some(created) = &task.created_at {
            title.push(Span::styled(
                format!("  {}", created.display_local()),
                self.theme.task_timestamp,
            ));
        }

        let mut row = Line::from(title);
        if is_selected && self.focused {
            row = row.style(self.theme.task_selected);
        }

        let mut lines = vec![row];
        if let Some(description) = task.visible_description() {
            let indent = " ".repeat(marker.chars().count() + checkbox.chars().count() + 2);
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(description, self.theme.task_description),
            ]));
        }
        lines
    }
}

impl Widget for TaskListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Tasks ({}) ", self.tasks.len()))
            .title_style(self.theme.title);
        let mut inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if let Some(error) = self.tasks.error() {
            Line::styled(error, self.theme.error).render(inner, buf);
            inner.y += 1;
            inner.height -= 1;
            if inner.height == 0 {
                return;
            }
        }

        if self.tasks.is_loading() {
            Line::styled(LOADING_TEXT, self.theme.text_muted).render(inner, buf);
            return;
        }
        if self.tasks.is_empty() {
            Line::styled(EMPTY_TEXT, self.theme.text_muted).render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        let mut selected_row = 0;
        for (index, task) in self.tasks.tasks().iter().enumerate() {
            let is_selected = index == self.selected;
            if is_selected {
                selected_row = lines.len();
            }
            lines.extend(self.task_lines(task, is_selected));
        }

        let visible = inner.height as usize;
        let scroll = (selected_row + 1).saturating_sub(visible);
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::task_list::TaskOutcome;
    use crate::tui::app::ASCII_SYMBOLS;
    use crate::types::TaskId;
    use serde_json::json;

    fn list_of(value: serde_json::Value) -> TaskList {
        let tasks: Vec<Task> = serde_json::from_value(value).unwrap();
        let mut list = TaskList::new();
        let _ = list.begin_load();
        list.apply(TaskOutcome::Loaded(Ok(tasks)));
        list
    }

    fn rows(widget: TaskListWidget<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn renders_unchecked_and_checked_tasks() {
        let list = list_of(json!([
            {"id": 2, "title": "Walk dog", "completed": true},
            {"id": 1, "title": "Buy milk", "completed": false, "description": "2 litres"}
        ]));
        let theme = Theme::default();
        let rows = rows(TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS), 50, 8);

        assert!(rows[0].contains("Tasks (2)"));
        assert!(rows[1].contains("[x] Walk dog"));
        assert!(rows[2].contains("[ ] Buy milk"));
        assert!(rows[3].contains("2 litres"));
    }

    #[test]
    fn selection_marker_only_when_focused() {
        let list = list_of(json!([{"id": 1, "title": "Buy milk", "completed": false}]));
        let theme = Theme::default();

        let unfocused = rows(TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS), 40, 4);
        assert!(unfocused[1].contains("  [ ] Buy milk"));

        let focused = rows(
            TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS).focused(true),
            40,
            4,
        );
        assert!(focused[1].contains("> [ ] Buy milk"));
    }

    #[test]
    fn shows_timestamp_for_local_datetime() {
        let list = list_of(json!([
            {"id": 1, "title": "Buy milk", "completed": false, "createdAt": "2024-01-15T10:30:00"}
        ]));
        let theme = Theme::default();
        let rows = rows(TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS), 50, 4);
        assert!(rows[1].contains("2024-01-15 10:30"));
    }

    #[test]
    fn empty_and_loading_states() {
        let theme = Theme::default();
        let empty = list_of(json!([]));
        let rendered = rows(TaskListWidget::new(&empty, &theme, &ASCII_SYMBOLS), 40, 4);
        assert!(rendered[1].contains(EMPTY_TEXT));

        let mut loading = TaskList::new();
        let _ = loading.begin_load();
        let rendered = rows(TaskListWidget::new(&loading, &theme, &ASCII_SYMBOLS), 40, 4);
        assert!(rendered[1].contains(LOADING_TEXT));
    }

    #[test]
    fn error_banner_above_list() {
        let mut list = list_of(json!([{"id": 1, "title": "Buy milk", "completed": false}]));
        list.apply(TaskOutcome::Deleted {
            id: TaskId::Number(1),
            result: Err(ApiError::Status {
                status: 500,
                message: String::new(),
            }),
        });
        let theme = Theme::default();
        let rendered = rows(TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS), 40, 5);
        assert!(rendered[1].contains("Failed to delete task"));
        assert!(rendered[2].contains("Buy milk"));
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let tasks: Vec<_> = (0..10)
            .map(|i| json!({"id": i, "title": format!("task {i}"), "completed": false}))
            .collect();
        let list = list_of(json!(tasks));
        let theme = Theme::default();
        let rendered = rows(
            TaskListWidget::new(&list, &theme, &ASCII_SYMBOLS)
                .focused(true)
                .selected(9),
            40,
            5,
        );
        assert!(rendered[3].contains("> [ ] task 9"));
        assert!(!rendered.iter().any(|r| r.contains("task 0")));
    }
}
