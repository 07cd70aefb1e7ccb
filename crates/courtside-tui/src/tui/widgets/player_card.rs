// Player card widget: bio of the last rendered player.

use chrono::{Local, NaiveDate};
use courtside_core::model::PlayerBio;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .title(" Player ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let today = Local::now().date_naive();
    let lines = build_card_lines(state.player_name.as_deref(), state.bio.as_ref(), today);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Card contents. Fields the provider left blank are skipped.
pub fn build_card_lines(
    name: Option<&str>,
    bio: Option<&PlayerBio>,
    today: NaiveDate,
) -> Vec<Line<'static>> {
    let display_name = name.or_else(|| bio.and_then(|b| b.display_name.as_deref()));
    let Some(display_name) = display_name else {
        return vec![Line::styled(
            "No player selected",
            Style::default().fg(Color::DarkGray),
        )];
    };

    let mut lines = vec![Line::styled(
        display_name.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    let Some(bio) = bio else {
        lines.push(Line::styled(
            "Bio unavailable",
            Style::default().fg(Color::DarkGray),
        ));
        return lines;
    };

    let age = bio.age_on(today).map(|a| a.to_string());
    let jersey = bio.jersey.as_ref().map(|j| format!("#{j}"));
    let fields = [
        ("Team", bio.team_name.as_deref()),
        ("Position", bio.position.as_deref()),
        ("Jersey", jersey.as_deref()),
        ("Height", bio.height.as_deref()),
        ("Weight", bio.weight.as_deref()),
        ("Age", age.as_deref()),
        ("School", bio.school.as_deref()),
        ("Country", bio.country.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(field_line(label, value));
        }
    }
    lines
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn curry_bio() -> PlayerBio {
        PlayerBio {
            display_name: Some("Stephen Curry".into()),
            school: Some("Davidson".into()),
            team_name: Some("Warriors".into()),
            height: Some("6-2".into()),
            weight: Some("185".into()),
            position: Some("Guard".into()),
            jersey: Some("30".into()),
            country: Some("USA".into()),
            birthdate: NaiveDate::from_ymd_opt(1988, 3, 14),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn empty_card_prompts_for_player() {
        let lines = build_card_lines(None, None, today());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "No player selected");
    }

    #[test]
    fn full_bio_lists_fields_with_age() {
        let bio = curry_bio();
        let texts: Vec<String> = build_card_lines(Some("Stephen Curry"), Some(&bio), today())
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(texts[0], "Stephen Curry");
        assert!(texts.contains(&"Team     Warriors".to_string()));
        assert!(texts.contains(&"Jersey   #30".to_string()));
        assert!(texts.contains(&"Age      35".to_string()));
        assert!(texts.contains(&"School   Davidson".to_string()));
    }

    #[test]
    fn missing_fields_are_skipped() {
        let bio = PlayerBio {
            team_name: Some(String::new()),
            position: Some("Forward".into()),
            ..PlayerBio::default()
        };
        let texts: Vec<String> = build_card_lines(Some("LeBron James"), Some(&bio), today())
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(texts, vec!["LeBron James", "Position Forward"]);
    }

    #[test]
    fn name_without_bio_says_unavailable() {
        let texts: Vec<String> = build_card_lines(Some("LeBron James"), None, today())
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(texts, vec!["LeBron James", "Bio unavailable"]);
    }

    #[test]
    fn bio_display_name_is_a_fallback() {
        let bio = curry_bio();
        let lines = build_card_lines(None, Some(&bio), today());
        assert_eq!(line_text(&lines[0]), "Stephen Curry");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.player_name = Some("Stephen Curry".into());
        state.bio = Some(curry_bio());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
