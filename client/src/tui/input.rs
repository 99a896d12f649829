//! Keyboard handling.
//!
//! [`handle_key`] applies a key press to [`AppState`] and returns the
//! backend request to start, if any. It never performs I/O itself, so the
//! whole key map can be tested without a terminal or a server.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::assistant::{AiAction, AssistantTab};
use crate::tui::app::{AppState, ConnectionStatus, Effect, Focus};

/// Rows moved by `PageUp`/`PageDown` in the assistant result area.
pub const RESULT_PAGE_ROWS: u16 = 10;

/// Applies `key` to `state`, returning a request to dispatch.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit();
        return None;
    }

    match key.code {
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::TitleInput | Focus::DescriptionInput => handle_form_key(state, key),
        Focus::QuestionInput => handle_question_key(state, key),
        Focus::TaskList => handle_list_key(state, key),
        Focus::Assistant => handle_assistant_key(state, key),
    }
}

/// Starts a health check and marks the status as checking.
pub fn check_health(state: &mut AppState) -> Effect {
    state.ai_status = ConnectionStatus::Checking;
    Effect::CheckHealth
}

/// Edits `buffer` for a typed character or backspace. Returns `true` if the
/// key was consumed.
fn edit_text(buffer: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    let buffer = if state.focus == Focus::TitleInput {
        &mut state.form.title
    } else {
        &mut state.form.description
    };
    if edit_text(buffer, key) {
        return None;
    }

    match key.code {
        KeyCode::Enter => state
            .tasks
            .begin_add(&state.form.title, &state.form.description)
            .map(Effect::Task),
        KeyCode::Esc => {
            state.focus = Focus::TaskList;
            None
        }
        _ => None,
    }
}

fn handle_question_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    if edit_text(state.assistant.question_mut(), key) {
        return None;
    }

    match key.code {
        KeyCode::Enter => state.assistant.begin(AiAction::Ask).map(Effect::Assistant),
        KeyCode::Esc => {
            state.focus = Focus::Assistant;
            None
        }
        _ => None,
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.select_prev();
            None
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let id = state.selected_task()?.id.clone();
            state.tasks.begin_toggle(&id).map(Effect::Task)
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let id = state.selected_task()?.id.clone();
            Some(Effect::Task(state.tasks.begin_remove(&id)))
        }
        KeyCode::Char('r') => Some(Effect::Task(state.tasks.begin_load())),
        KeyCode::Char('a') => {
            state.focus = Focus::TitleInput;
            None
        }
        KeyCode::Char('h') => Some(check_health(state)),
        KeyCode::Char('q') => {
            state.quit();
            None
        }
        _ => None,
    }
}

fn handle_assistant_key(state: &mut AppState, key: KeyEvent) -> Option<Effect> {
    let tab = state.assistant.tab();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.result_scroll.scroll_down(tab, 1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.result_scroll.scroll_up(tab, 1);
            None
        }
        KeyCode::PageDown => {
            state.result_scroll.scroll_down(tab, RESULT_PAGE_ROWS);
            None
        }
        KeyCode::PageUp => {
            state.result_scroll.scroll_up(tab, RESULT_PAGE_ROWS);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.result_scroll.reset(tab);
            None
        }
        KeyCode::Left => {
            state.assistant.select_tab(state.assistant.tab().prev());
            None
        }
        KeyCode::Right => {
            state.assistant.select_tab(state.assistant.tab().next());
            None
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = AssistantTab::from_index(index) {
                state.assistant.select_tab(tab);
            }
            None
        }
        KeyCode::Enter => {
            if state.assistant.tab() == AssistantTab::Qna {
                state.focus = Focus::QuestionInput;
                None
            } else {
                state.assistant.begin_selected().map(Effect::Assistant)
            }
        }
        KeyCode::Char('h') => Some(check_health(state)),
        KeyCode::Char('q') => {
            state.quit();
            None
        }
        _ => None,
    }
}
