//! Run-scoped player directory.
//!
//! `/players/nfl` is several megabytes, so it is fetched at most once per
//! process and handed to the code that needs it by reference.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use crate::error::AppError;
use crate::sleeper::api::SleeperClient;
use crate::sleeper::models::PlayerEntry;

/// A player id resolved to the fields the site and prompts show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedPlayer {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub nfl_team: String,
}

impl ResolvedPlayer {
    /// "Name (POS - TEAM)" as used in prompts.
    pub fn label(&self) -> String {
        format!("{} ({} - {})", self.name, self.position, self.nfl_team)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: HashMap<String, PlayerEntry>,
}

impl PlayerDirectory {
    pub fn new(players: HashMap<String, PlayerEntry>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Entries in player id order.
    pub fn iter_sorted(&self) -> Vec<(&String, &PlayerEntry)> {
        let mut entries: Vec<_> = self.players.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerEntry> {
        self.players.get(player_id)
    }

    pub fn resolve(&self, player_id: &str) -> Option<ResolvedPlayer> {
        self.get(player_id).map(|entry| ResolvedPlayer {
            player_id: player_id.to_string(),
            name: entry.display_name(),
            position: entry.position_or_empty(),
            nfl_team: entry.team_or_empty(),
        })
    }

    /// Resolves a player, leaving name, position and team empty for ids the
    /// directory does not know.
    pub fn resolve_or_blank(&self, player_id: &str) -> ResolvedPlayer {
        self.resolve(player_id).unwrap_or_else(|| {
            debug!("Player {player_id} not in directory");
            ResolvedPlayer {
                player_id: player_id.to_string(),
                name: String::new(),
                position: String::new(),
                nfl_team: String::new(),
            }
        })
    }

    /// Resolves a player, using the raw id as the name for unknown ids.
    pub fn resolve_or_id(&self, player_id: &str) -> ResolvedPlayer {
        let mut resolved = self.resolve_or_blank(player_id);
        if resolved.name.is_empty() {
            resolved.name = player_id.to_string();
        }
        resolved
    }
}

/// Holds the player directory for the lifetime of one run.
#[derive(Debug, Default)]
pub struct PlayerDirectoryCache {
    directory: Option<PlayerDirectory>,
}

impl PlayerDirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `directory` and never hits the network.
    pub fn preloaded(directory: PlayerDirectory) -> Self {
        Self {
            directory: Some(directory),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.directory.is_some()
    }

    /// Returns the directory, fetching it on first use.
    #[instrument(skip(self, client))]
    pub async fn get_or_fetch(
        &mut self,
        client: &SleeperClient,
    ) -> Result<&PlayerDirectory, AppError> {
        if self.directory.is_none() {
            let players = client.players().await?;
            info!("Player directory loaded ({} players)", players.len());
            self.directory = Some(PlayerDirectory::new(players));
        } else {
            debug!("Using player directory already loaded for this run");
        }
        Ok(self.directory.get_or_insert_with(PlayerDirectory::default))
    }
}
