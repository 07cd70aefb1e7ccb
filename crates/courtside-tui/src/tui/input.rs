// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (focus moves, stat
// and chart type selection).

use courtside_core::chart::{ChartType, StatSelection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (Search, Suggest, Quit). Returns `None` when the key was
/// handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits, whichever control has focus
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Tab => {
            view_state.focus = view_state.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            view_state.focus = view_state.focus.prev();
            return None;
        }
        KeyCode::Enter => return Some(view_state.search_command()),
        _ => {}
    }

    match view_state.focus {
        Focus::PlayerId => handle_player_input(key_event, view_state),
        Focus::Stat => handle_stat_list(key_event, view_state),
        Focus::ChartType => handle_chart_radio(key_event, view_state),
        Focus::Search => match key_event.code {
            KeyCode::Char(' ') => Some(view_state.search_command()),
            KeyCode::Char('q') => Some(UserCommand::Quit),
            _ => None,
        },
    }
}

/// Text entry for the player id field. Every edit requests fresh suggestions.
fn handle_player_input(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) => {
            view_state.player_input.push(c);
        }
        KeyCode::Backspace => {
            view_state.player_input.pop()?;
        }
        KeyCode::Esc => {
            if view_state.player_input.is_empty() {
                return None;
            }
            view_state.player_input.clear();
        }
        _ => return None,
    }
    Some(UserCommand::Suggest(view_state.player_input.clone()))
}

fn handle_stat_list(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let count = StatSelection::OPTIONS.len();
    match key_event.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.stat_index = (view_state.stat_index + 1) % count;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.stat_index = (view_state.stat_index + count - 1) % count;
            None
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

fn handle_chart_radio(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Right | KeyCode::Char('l') => {
            view_state.chart_type = step_chart_type(view_state.chart_type, 1);
            None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            view_state.chart_type = step_chart_type(view_state.chart_type, ChartType::ALL.len() - 1);
            None
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

fn step_chart_type(current: ChartType, step: usize) -> ChartType {
    let all = ChartType::ALL;
    let pos = all.iter().position(|c| *c == current).unwrap_or(0);
    all[(pos + step) % all.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
