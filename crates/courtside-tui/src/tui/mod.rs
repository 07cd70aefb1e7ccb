// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the form inputs and the latest search
// outcome. The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders on a tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::{DateTime, Local};
use courtside_core::chart::{ChartType, Figure, StatSelection};
use courtside_core::controller::SearchPhase;
use courtside_core::model::{DirectoryEntry, PlayerBio};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{UiUpdate, UserCommand};
use layout::build_layout;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Which form control receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    PlayerId,
    Stat,
    ChartType,
    Search,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::PlayerId, Focus::Stat, Focus::ChartType, Focus::Search];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the form inputs plus the last search outcome.
pub struct ViewState {
    /// Raw text of the player id field. Validation happens in the controller.
    pub player_input: String,
    /// Index into `StatSelection::OPTIONS`.
    pub stat_index: usize,
    pub chart_type: ChartType,
    pub focus: Focus,
    /// Number of times the search button was pressed.
    pub search_clicks: u64,
    /// Sequence number of the search in flight, if any.
    pub pending_seq: Option<u64>,
    pub figure: Figure,
    pub message: String,
    /// Terminal phase of the last finished search.
    pub last_phase: Option<SearchPhase>,
    pub player_name: Option<String>,
    pub bio: Option<PlayerBio>,
    /// Directory matches for a typed name.
    pub suggestions: Vec<DirectoryEntry>,
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            player_input: String::new(),
            stat_index: 0,
            chart_type: ChartType::default(),
            focus: Focus::PlayerId,
            search_clicks: 0,
            pending_seq: None,
            figure: Figure::empty(),
            message: String::new(),
            last_phase: None,
            player_name: None,
            bio: None,
            suggestions: Vec::new(),
            last_updated: None,
        }
    }
}

impl ViewState {
    /// Start with the configured stat and chart type preselected.
    pub fn with_defaults(stat: StatSelection, chart_type: ChartType) -> Self {
        let stat_index = StatSelection::OPTIONS
            .iter()
            .position(|s| *s == stat)
            .unwrap_or(0);
        ViewState {
            stat_index,
            chart_type,
            ..ViewState::default()
        }
    }

    pub fn selected_stat(&self) -> StatSelection {
        StatSelection::OPTIONS[self.stat_index % StatSelection::OPTIONS.len()]
    }

    /// Press the search button: bump the click counter and snapshot the form.
    pub fn search_command(&mut self) -> UserCommand {
        self.search_clicks += 1;
        UserCommand::Search {
            player_id: self.player_input.clone(),
            stat: self.selected_stat().code().to_string(),
            chart_type: self.chart_type.as_str().to_string(),
        }
    }

    pub fn is_searching(&self) -> bool {
        self.pending_seq.is_some()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SearchStarted { seq } => {
            state.pending_seq = Some(seq);
        }
        UiUpdate::SearchFinished(result) => {
            if state.pending_seq == Some(result.seq) {
                state.pending_seq = None;
            }
            state.figure = result.figure;
            state.message = result.message;
            state.last_phase = Some(result.phase);
            state.player_name = result.player_name;
            state.bio = result.bio;
            state.last_updated = Some(Local::now());
        }
        UiUpdate::Suggestions(entries) => {
            state.suggestions = entries;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header);
    widgets::search_form::render(frame, layout.form, state);
    widgets::player_card::render(frame, layout.player_card, state);
    widgets::stats_chart::render(frame, layout.chart, state);
    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::status_bar::render_help(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Hand a command to the orchestrator without waiting for channel space.
///
/// The orchestrator may itself be waiting on the UI channel this loop
/// drains, so the TUI never awaits a send. Returns `true` for `Quit`.
pub fn dispatch_command(cmd_tx: &mpsc::Sender<UserCommand>, cmd: UserCommand) -> bool {
    let quit = cmd == UserCommand::Quit;
    match cmd_tx.try_send(cmd) {
        Ok(()) => {}
        // Exiting drops the sender, which also stops the orchestrator.
        Err(_) if quit => {}
        Err(mpsc::error::TrySendError::Full(cmd)) => {
            warn!("command channel full, dropping {cmd:?}");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            debug!("command channel closed");
        }
    }
    quit
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(tick_rate);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            if dispatch_command(&cmd_tx, cmd) {
                                break;
                            }
                        }
                    }
                    // Mouse and resize events need no handling; the next
                    // tick redraws at the new size.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!("terminal input error: {e}");
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
