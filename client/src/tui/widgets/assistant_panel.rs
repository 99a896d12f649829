//! Assistant pane: tab bar, trigger line, and the selected tab's result.
//!
//! ```text
//! ┌ AI Assistant ──────────────────────────────────────┐
//! │ 1 Summary │ 2 Q&A │ 3 Categorize │ 4 Prioritize │ … │
//! │                                                    │
//! │ [ Categorize All Tasks ]                           │
//! │                                                    │
//! │ Buy milk  Shopping                                 │
//! │ Write report  Work                                 │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Analysis items are labelled through the [`TaskTitles`] snapshot; ids
//! missing from it show as "Unknown Task".
//!
//! The result area scrolls. The widget is stateful over [`ResultScroll`]:
//! each draw records how far the selected tab can scroll and clamps its
//! offset, and the bottom border shows the visible row range whenever the
//! result does not fit.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Tabs, Widget, Wrap},
};

use crate::assistant::{AiAction, AssistantState, AssistantTab};
use crate::task_list::TaskTitles;
use crate::tui::app::{Focus, ResultScroll, Symbols, Theme};
use crate::types::{AnalysisItem, AnalysisKind, PriorityLevel};

const QUESTION_LABEL: &str = "Question: ";
const QUESTION_PLACEHOLDER: &str = "Ask anything about your tasks...";

#[derive(Debug)]
pub struct AssistantPanelWidget<'a> {
    state: &'a AssistantState,
    titles: &'a TaskTitles,
    focus: Focus,
    theme: &'a Theme,
    symbols: &'a Symbols,
}

impl<'a> AssistantPanelWidget<'a> {
    #[must_use]
    pub fn new(
        state: &'a AssistantState,
        titles: &'a TaskTitles,
        focus: Focus,
        theme: &'a Theme,
        symbols: &'a Symbols,
    ) -> Self {
        Self {
            state,
            titles,
            focus,
            theme,
            symbols,
        }
    }

    fn is_focused(&self) -> bool {
        matches!(self.focus, Focus::Assistant | Focus::QuestionInput)
    }

    fn tabs(&self) -> Tabs<'a> {
        let titles = AssistantTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())));
        Tabs::new(titles)
            .select(self.state.tab().index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider("|")
    }

    fn trigger_line(&self, action: AiAction) -> Line<'a> {
        if self.state.is_busy(action) {
            return Line::from(Span::styled(
                action.busy_label(),
                self.theme.trigger_busy,
            ));
        }

        let mut spans = vec![Span::styled(
            format!("[ {} ]", action.label()),
            self.theme.trigger,
        )];
        if self.focus == Focus::Assistant {
            spans.push(Span::styled(
                format!(" {} Enter", self.symbols.arrow),
                self.theme.text_muted,
            ));
        }
        Line::from(spans)
    }

    fn question_line(&self) -> Line<'a> {
        let focused = self.focus == Focus::QuestionInput;
        let question = self.state.question();
        let mut spans = vec![Span::styled(QUESTION_LABEL, self.theme.label)];
        if question.is_empty() && !focused {
            spans.push(Span::styled(QUESTION_PLACEHOLDER, self.theme.placeholder));
        } else {
            let style = if focused {
                self.theme.input_focused
            } else {
                self.theme.input_unfocused
            };
            spans.push(Span::styled(question, style));
        }
        if focused {
            spans.push(Span::styled("_", self.theme.input_focused));
        }
        Line::from(spans)
    }

    fn badge_style(&self, kind: AnalysisKind, payload: &str) -> Style {
        match kind {
            AnalysisKind::Priority => self.theme.priority(PriorityLevel::from_label(payload)),
            AnalysisKind::Category | AnalysisKind::Recommendation => self.theme.badge,
        }
    }

    fn analysis_lines(&self, kind: AnalysisKind, items: &'a [AnalysisItem]) -> Vec<Line<'a>> {
        let title_style = self.theme.text_primary.add_modifier(Modifier::BOLD);
        let mut lines = Vec::with_capacity(items.len() * 2);

        for item in items {
            let title = Span::styled(self.titles.title_for(&item.task_id).to_string(), title_style);
            match kind {
                AnalysisKind::Recommendation => {
                    lines.push(Line::from(vec![
                        Span::styled(self.symbols.bullet, self.theme.text_muted),
                        Span::raw(" "),
                        title,
                    ]));
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(item.payload.as_str(), self.theme.ai_result),
                    ]));
                }
                AnalysisKind::Category | AnalysisKind::Priority => {
                    lines.push(Line::from(vec![
                        title,
                        Span::raw("  "),
                        Span::styled(
                            format!(" {} ", item.payload),
                            self.badge_style(kind, &item.payload),
                        ),
                    ]));
                }
            }
        }
        lines
    }

    fn result_lines(&self) -> Vec<Line<'a>> {
        let text_line = |text: &'a str| {
            if text.is_empty() {
                Vec::new()
            } else {
                text.lines()
                    .map(|l| Line::styled(l, self.theme.ai_result))
                    .collect()
            }
        };

        match self.state.tab() {
            AssistantTab::Summary => text_line(self.state.summary()),
            AssistantTab::Qna => text_line(self.state.answer()),
            tab => match tab.action().analysis_kind() {
                Some(kind) => self.analysis_lines(kind, self.state.analysis(kind)),
                None => Vec::new(),
            },
        }
    }
}

impl StatefulWidget for AssistantPanelWidget<'_> {
    type State = ResultScroll;

    fn render(self, area: Rect, buf: &mut Buffer, scroll: &mut ResultScroll) {
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
            .title(" AI Assistant ")
            .title_style(self.theme.title);
        let inner = block.inner(area);

        if inner.width == 0 || inner.height == 0 {
            block.render(area, buf);
            return;
        }

        let tab = self.state.tab();
        let control_rows = if tab == AssistantTab::Qna { 2 } else { 1 };
        let [tabs_area, _, controls_area, _, results_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(control_rows),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let results = Paragraph::new(self.result_lines()).wrap(Wrap { trim: false });
        let total_rows = results.line_count(results_area.width);
        let visible_rows = usize::from(results_area.height);
        let limit = u16::try_from(total_rows.saturating_sub(visible_rows)).unwrap_or(u16::MAX);
        scroll.set_limit(tab, limit);
        let offset = scroll.offset(tab);

        let block = if limit > 0 {
            let first = usize::from(offset) + 1;
            let last = (usize::from(offset) + visible_rows).min(total_rows);
            block.title_bottom(
                Line::styled(format!(" {first}-{last} of {total_rows} "), self.theme.text_muted)
                    .right_aligned(),
            )
        } else {
            block
        };
        block.render(area, buf);

        self.tabs().render(tabs_area, buf);

        let mut controls = Vec::with_capacity(2);
        if tab == AssistantTab::Qna {
            controls.push(self.question_line());
        }
        controls.push(self.trigger_line(tab.action()));
        Paragraph::new(controls).render(controls_area, buf);

        results.scroll((offset, 0)).render(results_area, buf);
    }
}
