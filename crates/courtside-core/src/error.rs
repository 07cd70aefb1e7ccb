// Error taxonomy for fetching and charting player statistics.

use thiserror::Error;

use crate::model::PlayerId;

/// Failures surfaced by the stats client and the provider behind it.
///
/// The `Display` text of each variant is what the dashboard shows to the
/// user, so keep it short and free of internal detail.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The player id is missing, non-numeric, or not positive.
    #[error("Please enter a valid Player ID.")]
    InvalidPlayerId { input: String },

    /// The provider or the player directory has no record for the id.
    #[error("Player not found")]
    NotFound { player_id: PlayerId },

    /// The provider call failed, timed out, or returned a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but not in the tabular shape we expect.
    #[error("unexpected response from stats provider: {0}")]
    Malformed(String),
}

/// Failures while turning a stats table into chart series.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("unknown stat `{0}`")]
    UnknownStat(String),

    #[error("unknown chart type `{0}`")]
    UnknownChartType(String),
}
