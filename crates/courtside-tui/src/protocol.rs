// Messages exchanged between the TUI and the app orchestrator.

use courtside_core::controller::RenderResult;
use courtside_core::model::DirectoryEntry;

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// The search button was pressed with the current form values.
    Search {
        player_id: String,
        stat: String,
        chart_type: String,
    },
    /// The player field changed; look up matching names.
    Suggest(String),
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// A search with this sequence number is in flight.
    SearchStarted { seq: u64 },
    /// The latest search finished. Superseded results are never sent.
    SearchFinished(Box<RenderResult>),
    /// Directory matches for the player field.
    Suggestions(Vec<DirectoryEntry>),
}
