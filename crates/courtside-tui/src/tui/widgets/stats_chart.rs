// Stats chart widget: draws the rendered figure as a ratatui Chart.
//
// Seasons map to x = 0, 1, 2, ... and their labels go on the x axis.
// Seasons with no value for a stat are left out of that dataset.

use courtside_core::chart::{ChartSeries, ChartType, Figure};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub const PLACEHOLDER: &str = "No chart yet. Enter a Player ID and press Enter.";

/// Series colors, cycled when a figure has more series than entries.
const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::White,
    Color::LightYellow,
];

/// Render the current figure, or a placeholder when there is none.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let figure = &state.figure;
    let block = Block::default()
        .title(format!(" {} ", chart_title(figure)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if figure.is_empty() {
        let paragraph = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = figure.series.iter().map(series_points).collect();

    let datasets: Vec<Dataset> = figure
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(series.stat.clone())
                .marker(marker(series.chart_type))
                .graph_type(graph_type(series.chart_type))
                .style(Style::default().fg(series_color(i)))
                .data(data)
        })
        .collect();

    let seasons = figure.series.first().map(|s| s.x.as_slice()).unwrap_or(&[]);
    let x_max = seasons.len().saturating_sub(1).max(1) as f64;
    let [y_min, y_max] = y_bounds(&figure.series);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Season", Style::default().fg(Color::Gray)))
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels(seasons)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels(y_min, y_max)),
        );
    frame.render_widget(chart, area);
}

/// Single mapping from chart type to ratatui graph type.
pub fn graph_type(chart_type: ChartType) -> GraphType {
    match chart_type {
        ChartType::Line => GraphType::Line,
        ChartType::Bar => GraphType::Bar,
        ChartType::Scatter => GraphType::Scatter,
    }
}

/// Braille draws smooth lines; scatter points read better as dots.
pub fn marker(chart_type: ChartType) -> Marker {
    match chart_type {
        ChartType::Scatter => Marker::Dot,
        ChartType::Line | ChartType::Bar => Marker::Braille,
    }
}

pub fn series_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Block title: the series title for one stat, a combined one otherwise.
pub fn chart_title(figure: &Figure) -> String {
    match figure.series.as_slice() {
        [] => "Career Stats".to_string(),
        [only] => only.title.clone(),
        _ => "Stats over Career".to_string(),
    }
}

/// (season index, value) pairs, skipping seasons without a value.
pub fn series_points(series: &ChartSeries) -> Vec<(f64, f64)> {
    series
        .y
        .iter()
        .enumerate()
        .filter_map(|(i, y)| y.map(|v| (i as f64, v)))
        .collect()
}

/// Y range covering every value across all series, always including zero.
pub fn y_bounds(series: &[ChartSeries]) -> [f64; 2] {
    let values = series.iter().flat_map(|s| s.y.iter().flatten().copied());
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if max - min <= f64::EPSILON {
        return [min, min + 1.0];
    }
    // Headroom above the tallest value.
    [min, max + (max - min) * 0.05]
}

/// First, middle, and last season labels. Axis labels are spread evenly,
/// so more would drift away from their points.
pub fn x_labels(seasons: &[String]) -> Vec<String> {
    match seasons.len() {
        0 => Vec::new(),
        1 | 2 => seasons.to_vec(),
        n => vec![
            seasons[0].clone(),
            seasons[(n - 1) / 2].clone(),
            seasons[n - 1].clone(),
        ],
    }
}

fn y_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    let mid = (min + max) / 2.0;
    [min, mid, max]
        .into_iter()
        .map(|v| {
            Span::styled(
                format_value(v),
                Style::default().add_modifier(Modifier::DIM),
            )
        })
        .collect()
}

/// Percentages stay readable at two decimals; totals need none.
pub fn format_value(v: f64) -> String {
    if v.abs() < 10.0 {
        format!("{v:.2}")
    } else {
        format!("{v:.0}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
