//! Frame composition for the taskpad TUI.
//!
//! ```text
//! +------------------------------ header ------------------------------+
//! | add form            |  assistant pane                              |
//! |---------------------|                                              |
//! | task list           |                                              |
//! +------------------------------ footer ------------------------------+
//! ```
//!
//! Below [`WIDE_LAYOUT_THRESHOLD`] columns the two panes are stacked
//! vertically instead of side by side.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{AppState, Focus};
use crate::tui::widgets::{
    AssistantPanelWidget, HeaderWidget, HelpFooterWidget, TaskFormWidget, TaskListWidget,
    HEADER_HEIGHT, HELP_FOOTER_HEIGHT, TASK_FORM_HEIGHT,
};

/// Width at which the panes sit side by side.
pub const WIDE_LAYOUT_THRESHOLD: u16 = 90;

/// Smallest terminal the layout is drawn in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 16;

/// Renders the whole screen.
///
/// Takes the state mutably only to record the assistant result scroll
/// limits for the current frame size.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(frame, area, state);
        return;
    }

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(HELP_FOOTER_HEIGHT),
    ])
    .areas(area);

    frame.render_widget(
        HeaderWidget::new(state.ai_status, &state.theme, &state.symbols)
            .with_counts(state.tasks.pending_count(), state.tasks.completed_count())
            .loading(state.tasks.is_loading()),
        header,
    );

    let [task_pane, assistant_pane] = if body.width >= WIDE_LAYOUT_THRESHOLD {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body)
    } else {
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(body)
    };

    render_task_pane(frame, task_pane, state);
    frame.render_stateful_widget(
        AssistantPanelWidget::new(
            &state.assistant,
            &state.titles,
            state.focus,
            &state.theme,
            &state.symbols,
        ),
        assistant_pane,
        &mut state.result_scroll,
    );

    frame.render_widget(HelpFooterWidget::new(state.focus, &state.theme), footer);
}

fn render_task_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    let [form, list] =
        Layout::vertical([Constraint::Length(TASK_FORM_HEIGHT), Constraint::Fill(1)]).areas(area);

    frame.render_widget(
        TaskFormWidget::new(&state.form, state.focus, &state.theme),
        form,
    );
    frame.render_widget(
        TaskListWidget::new(&state.tasks, &state.theme, &state.symbols)
            .selected(state.selected)
            .focused(state.focus == Focus::TaskList),
        list,
    );
}

fn render_size_warning(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = format!(
        "Terminal too small ({}x{}). Need at least {MIN_WIDTH}x{MIN_HEIGHT}.",
        area.width, area.height
    );
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(message)
            .style(state.theme.error)
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        middle,
    );
}
