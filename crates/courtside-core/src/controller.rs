// Dashboard controller: one search, from raw user input to a render result.
//
// A search walks Idle -> Validating -> Fetching -> Building and ends in
// Rendered or Failed. Every failure is turned into a message plus an empty
// figure here, so nothing escapes to the UI host as an error.

use tracing::{debug, info, warn};

use crate::chart::{self, display_stat, is_all_stats, ChartType, Figure};
use crate::client::StatsClient;
use crate::model::{PlayerBio, PlayerId};

pub const INVALID_PLAYER_ID_MESSAGE: &str = "Please enter a valid Player ID.";
pub const INVALID_SELECTION_MESSAGE: &str = "Invalid stat selection!";

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// Phase of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Validating,
    Fetching,
    Building,
    Rendered,
    Failed,
}

/// Raw user input for one search, exactly as the UI collected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Sequence number issued by [`SearchSequence::next`].
    pub seq: u64,
    pub player_id: String,
    pub stat: String,
    pub chart_type: String,
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub seq: u64,
    /// Always `Rendered` or `Failed`.
    pub phase: SearchPhase,
    pub figure: Figure,
    pub message: String,
    pub player_name: Option<String>,
    pub bio: Option<PlayerBio>,
}

impl RenderResult {
    pub fn is_rendered(&self) -> bool {
        self.phase == SearchPhase::Rendered
    }
}

/// Per-search context handed to the controller instead of ambient globals.
pub struct SearchContext<'a> {
    pub client: &'a StatsClient,
}

impl<'a> SearchContext<'a> {
    pub fn new(client: &'a StatsClient) -> Self {
        SearchContext { client }
    }
}

// ---------------------------------------------------------------------------
// SearchSequence
// ---------------------------------------------------------------------------

/// Issues increasing sequence numbers so a result from a superseded search
/// can be recognized and dropped.
#[derive(Debug, Default)]
pub struct SearchSequence {
    current: u64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.current
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

struct Machine {
    seq: u64,
    phase: SearchPhase,
}

impl Machine {
    fn new(seq: u64) -> Self {
        Machine {
            seq,
            phase: SearchPhase::Idle,
        }
    }

    fn advance(&mut self, next: SearchPhase) {
        debug!(seq = self.seq, from = ?self.phase, to = ?next, "search phase");
        self.phase = next;
    }

    fn fail(mut self, message: String, bio: Option<PlayerBio>) -> RenderResult {
        self.advance(SearchPhase::Failed);
        info!(seq = self.seq, "search failed: {message}");
        RenderResult {
            seq: self.seq,
            phase: self.phase,
            figure: Figure::empty(),
            message,
            player_name: None,
            bio,
        }
    }
}

/// Run one search to completion.
///
/// Validation happens before any provider call: a bad player id or an
/// unknown chart type never reaches the network.
pub async fn run_search(ctx: &SearchContext<'_>, request: SearchRequest) -> RenderResult {
    let mut machine = Machine::new(request.seq);

    machine.advance(SearchPhase::Validating);
    let player_id = match PlayerId::parse(&request.player_id) {
        Ok(id) => id,
        Err(_) => return machine.fail(INVALID_PLAYER_ID_MESSAGE.to_string(), None),
    };
    let chart_type = match request.chart_type.parse::<ChartType>() {
        Ok(chart_type) => chart_type,
        Err(e) => {
            debug!(seq = request.seq, "rejecting selection: {e}");
            return machine.fail(INVALID_SELECTION_MESSAGE.to_string(), None);
        }
    };

    machine.advance(SearchPhase::Fetching);
    let (stats, bio) = tokio::join!(
        ctx.client.fetch_career_stats(player_id),
        ctx.client.fetch_player_bio(player_id),
    );
    let table = match stats {
        Ok(table) => table,
        Err(e) => {
            warn!(seq = request.seq, %player_id, "career stats fetch failed: {e}");
            return machine.fail(fetch_error_message(player_id, &e), bio);
        }
    };
    let name = match ctx.client.resolve_player_name(player_id, bio.as_ref()) {
        Ok(name) => name,
        Err(e) => return machine.fail(fetch_error_message(player_id, &e), bio),
    };

    machine.advance(SearchPhase::Building);
    let figure = match chart::build_figure(&table, &request.stat, chart_type) {
        Ok(figure) => figure,
        Err(e) => {
            debug!(seq = request.seq, "rejecting selection: {e}");
            return machine.fail(INVALID_SELECTION_MESSAGE.to_string(), bio);
        }
    };

    machine.advance(SearchPhase::Rendered);
    let message = if is_all_stats(&request.stat) {
        format!("Player {name} - Stats over Career")
    } else {
        format!("Player {name} - {} over Career", display_stat(&request.stat))
    };
    info!(
        seq = request.seq,
        %player_id,
        series = figure.series.len(),
        "search rendered"
    );

    RenderResult {
        seq: machine.seq,
        phase: machine.phase,
        figure,
        message,
        player_name: Some(name),
        bio,
    }
}

fn fetch_error_message(player_id: PlayerId, err: &crate::error::StatsError) -> String {
    format!("Error fetching data for Player ID {player_id}: {err}")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
