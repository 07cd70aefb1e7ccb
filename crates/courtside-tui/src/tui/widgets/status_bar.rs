// Status bar widget: search outcome, in-flight indicator, and key hints.

use courtside_core::controller::SearchPhase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the status line.
///
/// Layout: [searching indicator] [message] [last updated]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    if state.is_searching() {
        spans.push(Span::styled(
            " searching... ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if !state.message.is_empty() {
        spans.push(Span::styled(
            format!(" {} ", state.message),
            Style::default().fg(phase_color(state.last_phase)),
        ));
    }

    if let Some(updated) = state.last_updated {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Green for a rendered chart, red for a failed search.
pub fn phase_color(phase: Option<SearchPhase>) -> Color {
    match phase {
        Some(SearchPhase::Rendered) => Color::Green,
        Some(SearchPhase::Failed) => Color::Red,
        _ => Color::White,
    }
}

/// Render the key hints for the focused control.
pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::styled(
        help_text(state.focus),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(paragraph, area);
}

pub fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::PlayerId => " type id or name | Esc clear | Tab next | Enter search | Ctrl+C quit",
        Focus::Stat => " Up/Down stat | Tab next | Enter search | q quit",
        Focus::ChartType => " Left/Right chart type | Tab next | Enter search | q quit",
        Focus::Search => " Enter/Space search | Tab next | q quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol())
            .collect()
    }

    #[test]
    fn phase_color_values() {
        assert_eq!(phase_color(Some(SearchPhase::Rendered)), Color::Green);
        assert_eq!(phase_color(Some(SearchPhase::Failed)), Color::Red);
        assert_eq!(phase_color(None), Color::White);
    }

    #[test]
    fn help_text_mentions_quit_everywhere() {
        for focus in [Focus::PlayerId, Focus::Stat, Focus::ChartType, Focus::Search] {
            assert!(help_text(focus).contains("quit"), "{focus:?}");
        }
    }

    #[test]
    fn render_shows_message_and_indicator() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.pending_seq = Some(2);
        state.message = "Please enter a valid Player ID.".into();
        state.last_phase = Some(SearchPhase::Failed);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let text = row_text(&terminal);
        assert!(text.contains("searching..."));
        assert!(text.contains("Please enter a valid Player ID."));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        terminal
            .draw(|frame| render_help(frame, frame.area(), &state))
            .unwrap();
        assert!(row_text(&terminal).contains("Enter search"));
    }
}
