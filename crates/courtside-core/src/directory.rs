// Static player directory: id -> display name lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::model::{DirectoryEntry, PlayerId};

/// Players bundled with the binary.
const EMBEDDED_PLAYERS: &str = include_str!("../data/players.json");

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read player directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse player directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reference table of known players.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    entries: Vec<DirectoryEntry>,
    by_id: HashMap<PlayerId, usize>,
}

impl PlayerDirectory {
    /// Build a directory from entries. The first entry for a duplicated id wins.
    pub fn from_entries(entries: Vec<DirectoryEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in entries {
            if by_id.contains_key(&entry.id) {
                debug!(id = %entry.id, "skipping duplicate directory entry");
                continue;
            }
            by_id.insert(entry.id, kept.len());
            kept.push(entry);
        }
        PlayerDirectory {
            entries: kept,
            by_id,
        }
    }

    /// Parse a JSON array of directory entries.
    pub fn from_json(text: &str) -> Result<Self, DirectoryError> {
        let entries: Vec<DirectoryEntry> = serde_json::from_str(text)?;
        Ok(Self::from_entries(entries))
    }

    /// The directory shipped with the binary.
    pub fn embedded() -> Result<Self, DirectoryError> {
        Self::from_json(EMBEDDED_PLAYERS)
    }

    /// Load a directory from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Use the configured file when set, the embedded table otherwise.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let directory = match &config.path {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::embedded()?,
        };
        info!("Player directory loaded with {} entries", directory.len());
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_id(&self, id: PlayerId) -> Option<&DirectoryEntry> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Case-insensitive substring search on full names.
    ///
    /// Active players are listed first, then alphabetically by full name.
    pub fn search(&self, fragment: &str, limit: usize) -> Vec<&DirectoryEntry> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<&DirectoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.full_name.to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| {
            b.is_active
                .cmp(&a.is_active)
                .then_with(|| a.full_name.cmp(&b.full_name))
        });
        matches.truncate(limit);
        matches
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
