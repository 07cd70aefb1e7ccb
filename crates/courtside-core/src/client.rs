// Stats client: the thin layer between the controller and its data sources.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::directory::PlayerDirectory;
use crate::error::StatsError;
use crate::model::{CareerStatsTable, PlayerBio, PlayerId};
use crate::provider::StatsProvider;

/// Fetches career tables, names, and bios for a validated player id.
///
/// Callers validate ids with [`PlayerId::parse`] before reaching this type,
/// so every method here may touch the network.
#[derive(Clone)]
pub struct StatsClient {
    provider: Arc<dyn StatsProvider>,
    directory: Arc<PlayerDirectory>,
}

impl StatsClient {
    pub fn new(provider: Arc<dyn StatsProvider>, directory: Arc<PlayerDirectory>) -> Self {
        StatsClient {
            provider,
            directory,
        }
    }

    pub fn directory(&self) -> &PlayerDirectory {
        &self.directory
    }

    /// Career totals; an empty table from the provider is `NotFound`.
    pub async fn fetch_career_stats(
        &self,
        player_id: PlayerId,
    ) -> Result<CareerStatsTable, StatsError> {
        let table = self.provider.career_stats(player_id).await?;
        if table.is_empty() {
            return Err(StatsError::NotFound { player_id });
        }
        Ok(table)
    }

    /// Display name from the player directory.
    pub fn fetch_player_name(&self, player_id: PlayerId) -> Result<String, StatsError> {
        self.directory
            .find_by_id(player_id)
            .map(|entry| entry.full_name.clone())
            .ok_or(StatsError::NotFound { player_id })
    }

    /// Display name for a search result: the directory entry, else the
    /// name the provider put in the bio.
    pub fn resolve_player_name(
        &self,
        player_id: PlayerId,
        bio: Option<&PlayerBio>,
    ) -> Result<String, StatsError> {
        self.fetch_player_name(player_id).or_else(|err| {
            let name = bio.and_then(|b| b.display_name.clone()).ok_or(err)?;
            debug!(%player_id, "name taken from player bio");
            Ok(name)
        })
    }

    /// Bio for the side panel. Advisory only: failures read as "not found".
    pub async fn fetch_player_bio(&self, player_id: PlayerId) -> Option<PlayerBio> {
        match self.provider.player_info(player_id).await {
            Ok(bio) => bio,
            Err(e) => {
                warn!(%player_id, "player bio unavailable: {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
