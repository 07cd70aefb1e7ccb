// Data model: player ids, career stat tables, bios, and directory entries.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StatsError;

/// Column holding the season identifier ("2015-16") in career tables.
pub const SEASON_COLUMN: &str = "SEASON_ID";

/// Column holding the player id in career tables.
pub const PLAYER_COLUMN: &str = "PLAYER_ID";

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// A positive integer identifying a player in the provider's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct PlayerId(u64);

impl PlayerId {
    /// Accept only strictly positive ids.
    pub fn new(raw: i64) -> Result<Self, StatsError> {
        if raw <= 0 {
            return Err(StatsError::InvalidPlayerId {
                input: raw.to_string(),
            });
        }
        Ok(PlayerId(raw as u64))
    }

    /// Parse raw user input. Anything other than a positive integer
    /// (after trimming whitespace) is rejected.
    pub fn parse(input: &str) -> Result<Self, StatsError> {
        let trimmed = input.trim();
        let raw = trimmed
            .parse::<i64>()
            .map_err(|_| StatsError::InvalidPlayerId {
                input: input.to_string(),
            })?;
        Self::new(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for PlayerId {
    type Error = StatsError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        PlayerId::new(raw)
    }
}

impl From<PlayerId> for u64 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Career stats table
// ---------------------------------------------------------------------------

/// A single cell of a provider table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell as a label (used for season ids).
    pub fn to_label(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Bool(b) => Cell::Text(b.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// One season of a player's career, with cells aligned to the table columns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CareerStatRow {
    season_id: String,
    cells: Vec<Cell>,
}

/// Season-indexed statistics for one player, in provider order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CareerStatsTable {
    columns: Vec<String>,
    rows: Vec<CareerStatRow>,
}

impl CareerStatsTable {
    /// Build a table from column names and raw rows.
    ///
    /// Every row must have one cell per column, and a non-empty table must
    /// carry a `SEASON_ID` column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, StatsError> {
        if rows.is_empty() {
            return Ok(CareerStatsTable {
                columns,
                rows: Vec::new(),
            });
        }

        let season_idx = columns
            .iter()
            .position(|c| c == SEASON_COLUMN)
            .ok_or_else(|| StatsError::Malformed(format!("missing {SEASON_COLUMN} column")))?;

        let mut out = Vec::with_capacity(rows.len());
        for (i, cells) in rows.into_iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(StatsError::Malformed(format!(
                    "row {i} has {} cells, expected {}",
                    cells.len(),
                    columns.len()
                )));
            }
            let season_id = cells[season_idx].to_label();
            out.push(CareerStatRow { season_id, cells });
        }

        Ok(CareerStatsTable { columns, rows: out })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Season ids in table order.
    pub fn seasons(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.season_id.clone()).collect()
    }

    /// Numeric values of a column in table order; non-numeric cells are `None`.
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(self.values_at(idx))
    }

    pub(crate) fn values_at(&self, idx: usize) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.cells[idx].as_number()).collect()
    }

    /// A column is numeric when it holds at least one number and no text.
    pub fn is_numeric_column(&self, idx: usize) -> bool {
        let mut saw_number = false;
        for row in &self.rows {
            match &row.cells[idx] {
                Cell::Number(_) => saw_number = true,
                Cell::Text(_) => return false,
                Cell::Null => {}
            }
        }
        saw_number
    }
}

// ---------------------------------------------------------------------------
// Player bio and directory entries
// ---------------------------------------------------------------------------

/// Biographical record shown next to the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerBio {
    pub display_name: Option<String>,
    pub school: Option<String>,
    pub team_name: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub country: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

impl PlayerBio {
    /// Age in whole years on the given date, if the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.birthdate?;
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// One entry of the static player directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DirectoryEntry {
    pub id: PlayerId,
    pub full_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
