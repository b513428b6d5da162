use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use super::urls::{
    build_matchups_url, build_players_url, build_projections_url, build_rosters_url,
    build_state_url, build_users_url,
};
use crate::config::Config;
use crate::error::AppError;
use crate::http::get_json;
use crate::sleeper::league::League;
use crate::sleeper::models::{
    NflState, PlayerEntry, RawProjection, SleeperMatchup, SleeperRoster, SleeperUser,
};

/// Read-only client for the Sleeper REST API.
///
/// Every method issues exactly one GET request. There is no retry and no
/// caching here; the player directory cache lives in
/// [`crate::sleeper::PlayerDirectoryCache`].
#[derive(Debug, Clone)]
pub struct SleeperClient {
    http: Client,
    api_base: String,
}

impl SleeperClient {
    pub fn new(http: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { http, api_base }
    }

    /// Builds a client on `http` pointed at the configured API base.
    pub fn from_config(config: &Config, http: Client) -> Self {
        Self::new(http, config.sleeper_api_base.clone())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    #[instrument(skip(self))]
    pub async fn league_users(&self, league_id: &str) -> Result<Vec<SleeperUser>, AppError> {
        let users: Vec<SleeperUser> =
            get_json(&self.http, &build_users_url(&self.api_base, league_id)).await?;
        info!("Fetched {} users for league {league_id}", users.len());
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn league_rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>, AppError> {
        let rosters: Vec<SleeperRoster> =
            get_json(&self.http, &build_rosters_url(&self.api_base, league_id)).await?;
        info!("Fetched {} rosters for league {league_id}", rosters.len());
        Ok(rosters)
    }

    /// Users and rosters of a league, fetched one after the other.
    pub async fn league(&self, league_id: &str) -> Result<League, AppError> {
        let users = self.league_users(league_id).await?;
        let rosters = self.league_rosters(league_id).await?;
        Ok(League::new(league_id, users, rosters))
    }

    /// Matchup entries for one week. Before the season starts Sleeper answers
    /// with `null` or an empty object, which is treated as a week without
    /// matchups.
    #[instrument(skip(self))]
    pub async fn matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<SleeperMatchup>, AppError> {
        let url = build_matchups_url(&self.api_base, league_id, week);
        let value: Value = get_json(&self.http, &url).await?;
        array_or_empty(value, &url)
    }

    /// The full NFL player directory keyed by player id.
    #[instrument(skip(self))]
    pub async fn players(&self) -> Result<HashMap<String, PlayerEntry>, AppError> {
        let players: HashMap<String, PlayerEntry> =
            get_json(&self.http, &build_players_url(&self.api_base)).await?;
        info!("Fetched player directory with {} entries", players.len());
        Ok(players)
    }

    /// Current NFL state. A body that is not an object yields an empty state.
    #[instrument(skip(self))]
    pub async fn nfl_state(&self) -> Result<NflState, AppError> {
        let url = build_state_url(&self.api_base);
        let value: Value = get_json(&self.http, &url).await?;
        if !value.is_object() {
            warn!("Unexpected NFL state payload from {url}, using defaults");
            return Ok(NflState::default());
        }
        from_value(value, &url)
    }

    #[instrument(skip(self))]
    pub async fn projections(
        &self,
        season: u32,
        week: u32,
        position: Option<&str>,
        season_type: &str,
    ) -> Result<Vec<RawProjection>, AppError> {
        let url = build_projections_url(&self.api_base, season, week, position, season_type);
        let value: Value = get_json(&self.http, &url).await?;
        array_or_empty(value, &url)
    }
}

fn array_or_empty<T: DeserializeOwned>(value: Value, url: &str) -> Result<Vec<T>, AppError> {
    if !value.is_array() {
        warn!("Non-array payload from {url}, treating as empty");
        return Ok(Vec::new());
    }
    from_value(value, url)
}

fn from_value<T: DeserializeOwned>(value: Value, url: &str) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::api_unexpected_structure(e.to_string(), url))
}
