// Chart building: stat selection, chart-type dispatch, and series shaping.
//
// The transform is pure. Given the same table and selection it always yields
// the same series, and it never touches the network or shared state.

use std::str::FromStr;

use crate::error::ChartError;
use crate::model::{CareerStatsTable, PLAYER_COLUMN, SEASON_COLUMN};

// ---------------------------------------------------------------------------
// ChartType
// ---------------------------------------------------------------------------

/// Visual rendering style for every series in a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Scatter,
}

/// Lookup table from the wire value to the chart type and its UI label.
static CHART_TYPES: [(&str, ChartType, &str); 3] = [
    ("line", ChartType::Line, "Line Graph"),
    ("bar", ChartType::Bar, "Bar Graph"),
    ("scatter", ChartType::Scatter, "Scatter Plot"),
];

impl ChartType {
    /// All chart types in display order.
    pub const ALL: [ChartType; 3] = [ChartType::Line, ChartType::Bar, ChartType::Scatter];

    fn entry(self) -> &'static (&'static str, ChartType, &'static str) {
        // CHART_TYPES has exactly one entry per variant.
        &CHART_TYPES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.entry().0
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        CHART_TYPES
            .iter()
            .find(|(value, _, _)| value.eq_ignore_ascii_case(key))
            .map(|(_, chart_type, _)| *chart_type)
            .ok_or_else(|| ChartError::UnknownChartType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StatSelection
// ---------------------------------------------------------------------------

/// The statistics offered in the stat picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatSelection {
    Points,
    Assists,
    Rebounds,
    Blocks,
    Steals,
    FieldGoalPct,
    FreeThrowPct,
    ThreePointPct,
    All,
}

/// (selection, code, label, provider column)
static STAT_OPTIONS: [(StatSelection, &str, &str, Option<&str>); 9] = [
    (StatSelection::Points, "PTS", "Points (PTS)", Some("PTS")),
    (StatSelection::Assists, "AST", "Assists (AST)", Some("AST")),
    (StatSelection::Rebounds, "REB", "Rebounds (REB)", Some("REB")),
    (StatSelection::Blocks, "BLK", "Blocks (BLK)", Some("BLK")),
    (StatSelection::Steals, "STL", "Steals (STL)", Some("STL")),
    (
        StatSelection::FieldGoalPct,
        "FG_PCT",
        "Field Goal Percentage (FG_PCT)",
        Some("FG_PCT"),
    ),
    (
        StatSelection::FreeThrowPct,
        "FT_PCT",
        "Free Throw Percentage (FT_PCT)",
        Some("FT_PCT"),
    ),
    (
        StatSelection::ThreePointPct,
        "3P_PCT",
        "3-Point Percentage (3P_PCT)",
        Some("FG3_PCT"),
    ),
    (StatSelection::All, "all", "All Stats", None),
];

impl StatSelection {
    /// All selections in picker order.
    pub const OPTIONS: [StatSelection; 9] = [
        StatSelection::Points,
        StatSelection::Assists,
        StatSelection::Rebounds,
        StatSelection::Blocks,
        StatSelection::Steals,
        StatSelection::FieldGoalPct,
        StatSelection::FreeThrowPct,
        StatSelection::ThreePointPct,
        StatSelection::All,
    ];

    fn entry(self) -> &'static (StatSelection, &'static str, &'static str, Option<&'static str>) {
        &STAT_OPTIONS[self as usize]
    }

    /// Value sent with a search ("PTS", ..., "all").
    pub fn code(self) -> &'static str {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }

    /// Provider column holding this stat; `None` for [`StatSelection::All`].
    pub fn column(self) -> Option<&'static str> {
        self.entry().3
    }
}

impl FromStr for StatSelection {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        STAT_OPTIONS
            .iter()
            .find(|(_, code, _, _)| code.eq_ignore_ascii_case(key))
            .map(|(selection, _, _, _)| *selection)
            .ok_or_else(|| ChartError::UnknownStat(s.to_string()))
    }
}

/// True when the raw stat value asks for every column.
pub fn is_all_stats(stat: &str) -> bool {
    matches!(stat.parse::<StatSelection>(), Ok(StatSelection::All))
}

// ---------------------------------------------------------------------------
// Series and figures
// ---------------------------------------------------------------------------

/// One plotted statistic: seasons on x, values on y.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Stat name as shown to the user ("PTS", "3P_PCT", ...).
    pub stat: String,
    pub title: String,
    pub chart_type: ChartType,
    pub x: Vec<String>,
    /// `None` where the provider had no value for that season.
    pub y: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Everything the chart panel needs to draw.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub chart_type: ChartType,
    pub series: Vec<ChartSeries>,
}

impl Figure {
    /// The placeholder shown when a search fails.
    pub fn empty() -> Self {
        Figure::default()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Series title, shared by single-stat and all-stats mode.
pub fn series_title(stat: &str) -> String {
    format!("{stat} over Career")
}

/// Canonical display name of a stat value: the picker code when it is one
/// of the offered stats, the trimmed input otherwise.
pub fn display_stat(stat: &str) -> String {
    match stat.parse::<StatSelection>() {
        Ok(selection) => selection.code().to_string(),
        Err(_) => stat.trim().to_string(),
    }
}

/// Find the index of the chartable column a stat value refers to.
///
/// A literal column name wins; otherwise a picker code is mapped to its
/// provider column (`3P_PCT` is published as `FG3_PCT`). Identifier and
/// non-numeric columns are never chartable.
fn resolve_column(table: &CareerStatsTable, stat: &str) -> Option<usize> {
    let key = stat.trim();
    let idx = match table.column_index(key) {
        Some(idx) => idx,
        None => table.column_index(stat.parse::<StatSelection>().ok()?.column()?)?,
    };
    let name = table.columns()[idx].as_str();
    if name == SEASON_COLUMN || name == PLAYER_COLUMN || !table.is_numeric_column(idx) {
        return None;
    }
    Some(idx)
}

/// Build the series for one stat.
pub fn build_single_series(
    table: &CareerStatsTable,
    stat: &str,
    chart_type: ChartType,
) -> Result<ChartSeries, ChartError> {
    let idx =
        resolve_column(table, stat).ok_or_else(|| ChartError::UnknownStat(stat.to_string()))?;
    let name = display_stat(stat);

    Ok(ChartSeries {
        title: series_title(&name),
        stat: name,
        chart_type,
        x: table.seasons(),
        y: table.values_at(idx),
    })
}

/// Build one series per numeric column, skipping the season and player ids.
pub fn build_all_series(table: &CareerStatsTable, chart_type: ChartType) -> Vec<ChartSeries> {
    let seasons = table.seasons();
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() != SEASON_COLUMN && name.as_str() != PLAYER_COLUMN)
        .filter(|(idx, _)| table.is_numeric_column(*idx))
        .map(|(idx, name)| ChartSeries {
            stat: name.clone(),
            title: series_title(name),
            chart_type,
            x: seasons.clone(),
            y: table.values_at(idx),
        })
        .collect()
}

/// Build the figure for a raw stat value (a column name or `all`).
pub fn build_figure(
    table: &CareerStatsTable,
    stat: &str,
    chart_type: ChartType,
) -> Result<Figure, ChartError> {
    let series = if is_all_stats(stat) {
        build_all_series(table, chart_type)
    } else {
        vec![build_single_series(table, stat, chart_type)?]
    };
    Ok(Figure { chart_type, series })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
