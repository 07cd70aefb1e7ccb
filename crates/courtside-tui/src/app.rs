// Application orchestration: runs searches and forwards their results.
//
// The event loop receives commands from the TUI, spawns one task per search,
// and pushes updates back to the TUI. Searches are never cancelled. Each one
// carries a sequence number and a result is forwarded only if no newer
// search has started since, so a slow response cannot overwrite a fresh one.

use std::sync::Arc;

use courtside_core::client::StatsClient;
use courtside_core::controller::{
    run_search, RenderResult, SearchContext, SearchRequest, SearchSequence,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{UiUpdate, UserCommand};

/// Maximum number of directory matches offered for a typed name.
pub const SUGGESTION_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub client: Arc<StatsClient>,
    /// Issues the sequence number of each search. Results whose number is no
    /// longer current are discarded in `handle_search_result`.
    pub sequence: SearchSequence,
    /// Sender handed to spawned search tasks.
    pub result_tx: mpsc::Sender<RenderResult>,
}

impl AppState {
    pub fn new(client: Arc<StatsClient>, result_tx: mpsc::Sender<RenderResult>) -> Self {
        AppState {
            client,
            sequence: SearchSequence::new(),
            result_tx,
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator until the TUI sends `Quit` or drops its sender.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut result_rx: mpsc::Receiver<RenderResult>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("App event loop started");

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) | None => {
                        info!("Quit requested, leaving app event loop");
                        break;
                    }
                    Some(cmd) => handle_command(&mut state, cmd, &ui_tx).await,
                }
            }

            // AppState holds a sender, so this channel never closes while
            // the loop runs.
            Some(result) = result_rx.recv() => {
                handle_search_result(&state, result, &ui_tx).await;
            }
        }
    }

    Ok(())
}

/// Handle a single command from the TUI.
pub async fn handle_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::Search {
            player_id,
            stat,
            chart_type,
        } => {
            let seq = state.sequence.next();
            info!(seq, player_id = %player_id, stat = %stat, chart_type = %chart_type, "Search requested");
            let _ = ui_tx.send(UiUpdate::SearchStarted { seq }).await;

            let request = SearchRequest {
                seq,
                player_id,
                stat,
                chart_type,
            };
            let client = Arc::clone(&state.client);
            let tx = state.result_tx.clone();
            tokio::spawn(async move {
                let ctx = SearchContext::new(&client);
                let result = run_search(&ctx, request).await;
                let _ = tx.send(result).await;
            });
        }
        UserCommand::Suggest(text) => {
            // Suggestions are superseded by the next keystroke, so a full UI
            // channel drops them instead of stalling the loop.
            let matches = suggestions(&state.client, &text);
            if let Err(mpsc::error::TrySendError::Full(_)) =
                ui_tx.try_send(UiUpdate::Suggestions(matches))
            {
                warn!("UI channel full, dropping suggestions for {text:?}");
            }
        }
        UserCommand::Quit => {}
    }
}

/// Forward a finished search to the TUI if it is still the latest one.
///
/// Returns `false` when the result was discarded as stale.
pub async fn handle_search_result(
    state: &AppState,
    result: RenderResult,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    if !state.sequence.is_current(result.seq) {
        debug!(
            "Discarding stale search result (result seq: {}, current seq: {})",
            result.seq,
            state.sequence.current()
        );
        return false;
    }
    let _ = ui_tx.send(UiUpdate::SearchFinished(Box::new(result))).await;
    true
}

/// Directory matches for a typed name. Numeric input gets no suggestions.
fn suggestions(
    client: &StatsClient,
    text: &str,
) -> Vec<courtside_core::model::DirectoryEntry> {
    if !text.chars().any(|c| c.is_alphabetic()) {
        return Vec::new();
    }
    client
        .directory()
        .search(text, SUGGESTION_LIMIT)
        .into_iter()
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
