// Header widget: dashboard title and tagline.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const TITLE: &str = "NBA Player Stats Dashboard";
pub const TAGLINE: &str = "Find stats about your favorite NBA player!";

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(TAGLINE, Style::default().fg(Color::Gray)),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
