// Search form widget: player id input, name suggestions, stat list,
// chart type radio, and the search button.

use courtside_core::chart::{ChartType, StatSelection};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

/// Render the search form into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let paragraph = Paragraph::new(build_form_lines(state)).block(block);
    frame.render_widget(paragraph, area);
}

/// Build every line of the form, top to bottom.
pub fn build_form_lines(state: &ViewState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(section_label("Player ID", state.focus == Focus::PlayerId));
    let cursor = if state.focus == Focus::PlayerId { "_" } else { "" };
    lines.push(Line::from(vec![
        Span::raw(" > "),
        Span::styled(
            format!("{}{}", state.player_input, cursor),
            Style::default().fg(Color::White),
        ),
    ]));
    for entry in &state.suggestions {
        lines.push(Line::styled(
            format!("   {} ({})", entry.full_name, entry.id),
            Style::default().fg(Color::DarkGray),
        ));
    }

    lines.push(Line::raw(""));
    lines.push(section_label("Stat", state.focus == Focus::Stat));
    let selected = state.selected_stat();
    for stat in StatSelection::OPTIONS {
        lines.push(stat_line(stat, stat == selected, state.focus == Focus::Stat));
    }

    lines.push(Line::raw(""));
    lines.push(section_label("Chart Type", state.focus == Focus::ChartType));
    lines.push(Line::from(chart_type_spans(state.chart_type)));

    lines.push(Line::raw(""));
    lines.push(search_button(state.search_clicks, state.focus == Focus::Search));

    lines
}

fn section_label(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::styled(format!("{label}:"), style)
}

fn stat_line(stat: StatSelection, selected: bool, focused: bool) -> Line<'static> {
    let marker = if selected { " > " } else { "   " };
    let style = match (selected, focused) {
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::White),
    };
    Line::from(vec![Span::raw(marker), Span::styled(stat.label(), style)])
}

/// Radio buttons for the chart type, e.g. "(•) Line Graph  ( ) Bar Graph".
pub fn chart_type_spans(current: ChartType) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for chart_type in ChartType::ALL {
        let (dot, style) = if chart_type == current {
            ("(•)", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            ("( )", Style::default().fg(Color::White))
        };
        spans.push(Span::styled(format!("{dot} {}", chart_type.label()), style));
        spans.push(Span::raw("  "));
    }
    spans
}

/// The search button label carries the click counter.
pub fn search_button_label(clicks: u64) -> String {
    if clicks == 0 {
        "[ Search ]".to_string()
    } else {
        format!("[ Search ({clicks}) ]")
    }
}

fn search_button(clicks: u64, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(search_button_label(clicks), style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
