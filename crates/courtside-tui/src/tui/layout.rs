// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the stats dashboard:
//
// +--------------------------------------------------+
// | Header (2 rows)                                   |
// +-------------------------+------------------------+
// | Search form (fill)      | Chart (65%)            |
// +-------------------------+                        |
// | Player card (10 rows)   |                        |
// +-------------------------+------------------------+
// | Status Bar (1 row)                                |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows reserved for the player card under the form.
const PLAYER_CARD_HEIGHT: u16 = 10;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Title and tagline.
    pub header: Rect,
    /// Left column top: player id, stat list, chart type, search button.
    pub form: Rect,
    /// Left column bottom: bio of the last rendered player.
    pub player_card: Rect,
    /// Right side: the career chart.
    pub chart: Rect,
    /// Search outcome message and in-flight indicator.
    pub status_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: header(2) | middle(fill) | status(1) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(10),   // form + chart
            Constraint::Length(1), // status bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let status_bar = vertical[2];
    let help_bar = vertical[3];

    // Horizontal: controls (35%) | chart (65%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(middle);

    let left = horizontal[0];
    let chart = horizontal[1];

    let left_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(PLAYER_CARD_HEIGHT)])
        .split(left);

    AppLayout {
        header,
        form: left_sections[0],
        player_card: left_sections[1],
        chart,
        status_bar,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
