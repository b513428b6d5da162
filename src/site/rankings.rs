//! Weekly power rankings.
//!
//! The same record types are written by the site builder (baseline order,
//! empty narrative) and by the narrative generator (LLM text).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use super::LeagueTarget;
use super::files::read_json_file;
use crate::error::AppError;
use crate::sleeper::League;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyPlayer {
    pub name: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub key_players: Vec<KeyPlayer>,
    pub bench_potential: String,
    pub make_or_break: String,
}

/// A citation returned by web-enabled generation, either a bare URL or a
/// titled link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Source {
    Url(String),
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
    pub roster_id: u32,
    pub team_name: String,
    pub rank: u32,
    pub summary: String,
    pub analysis: Analysis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

/// Contents of `power_rankings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekRankings {
    pub league_id: String,
    pub season: u32,
    pub week: u32,
    pub rankings: Vec<RankingEntry>,
}

impl WeekRankings {
    pub fn new(target: &LeagueTarget, rankings: Vec<RankingEntry>) -> Self {
        Self {
            league_id: target.league_id.clone(),
            season: target.season,
            week: target.week,
            rankings,
        }
    }

    pub async fn load(path: &Path) -> Result<Self, AppError> {
        read_json_file(path).await
    }

    /// Loads the week's rankings when the file exists.
    pub async fn load_if_exists(path: &Path) -> Result<Option<Self>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).await.map(Some)
    }

    pub fn ranks_by_roster(&self) -> HashMap<u32, u32> {
        self.rankings.iter().map(|r| (r.roster_id, r.rank)).collect()
    }
}

/// Ranks every roster by record: wins desc, losses asc, points-for desc,
/// then team name and roster id so the order is total.
pub fn baseline_rankings(league: &League) -> Vec<RankingEntry> {
    let names = league.team_names_by_roster();
    let mut rows: Vec<(u32, String, u32, u32, f64)> = league
        .rosters
        .iter()
        .map(|roster| {
            let record = roster.record();
            let name = names.get(&roster.roster_id).cloned().unwrap_or_default();
            (
                roster.roster_id,
                name,
                record.wins,
                record.losses,
                record.points_for(),
            )
        })
        .collect();

    rows.sort_by(|a, b| {
        b.2.cmp(&a.2)
            .then(a.3.cmp(&b.3))
            .then(b.4.partial_cmp(&a.4).unwrap_or(Ordering::Equal))
            .then_with(|| a.1.cmp(&b.1))
            .then(a.0.cmp(&b.0))
    });

    rows.into_iter()
        .enumerate()
        .map(|(idx, (roster_id, team_name, ..))| RankingEntry {
            roster_id,
            team_name,
            rank: idx as u32 + 1,
            summary: String::new(),
            analysis: Analysis::default(),
            sources: Vec::new(),
        })
        .collect()
}
