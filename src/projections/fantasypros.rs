//! FantasyPros weekly projections.
//!
//! FantasyPros publishes one CSV per position and identifies players only by
//! name and NFL team, so every row is matched against the Sleeper player
//! directory by normalised name.

use csv::{ReaderBuilder, StringRecord};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::{Projection, WeekProjections};
use crate::constants::FANTASYPROS_POSITIONS;
use crate::error::AppError;
use crate::http::get_text;
use crate::sleeper::PlayerDirectory;

/// Name suffixes dropped before matching.
const NAME_SUFFIXES: [&str; 5] = ["jr", "sr", "ii", "iii", "iv"];

const PLAYER_COLUMNS: [&str; 2] = ["Player", "PLAYER"];
const TEAM_COLUMNS: [&str; 2] = ["Team", "TEAM"];
const POINTS_COLUMNS: [&str; 3] = ["FPTS", "FPTS.", "Points"];

/// Client for the FantasyPros projections CSV export.
#[derive(Debug, Clone)]
pub struct FantasyProsClient {
    http: Client,
    base: String,
}

impl FantasyProsClient {
    pub fn new(http: Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    /// `{base}/{page}.php?week={week}&scoring={scoring}&csv=1`. Team
    /// defenses live on the `dst` page whether asked for as DEF or DST.
    pub fn projections_url(&self, position: &str, week: u32, scoring: &str) -> String {
        let page = match position.to_ascii_uppercase().as_str() {
            "DEF" | "DST" => "dst".to_string(),
            _ => position.to_ascii_lowercase(),
        };
        format!(
            "{}/{page}.php?week={week}&scoring={scoring}&csv=1",
            self.base
        )
    }

    #[instrument(skip(self))]
    pub async fn position_csv(
        &self,
        position: &str,
        week: u32,
        scoring: &str,
    ) -> Result<String, AppError> {
        get_text(&self.http, &self.projections_url(position, week, scoring)).await
    }
}

/// Lowercases, strips punctuation and generational suffixes, and collapses
/// whitespace: "Odell Beckham Jr." becomes "odell beckham".
pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| !NAME_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sleeper player ids keyed by normalised name and team, plus a name-only
/// lookup for rows that carry no team.
#[derive(Debug, Default)]
pub struct PlayerIndex {
    by_name_team: HashMap<(String, String), String>,
    by_name: HashMap<String, String>,
}

impl PlayerIndex {
    /// Indexes entries by `full_name`, or by first and last name when the
    /// full name is missing. Entries with neither are left out.
    ///
    /// When two players share a name and team the higher player id wins; the
    /// name-only lookup keeps the lowest.
    pub fn build(directory: &PlayerDirectory) -> Self {
        let mut index = Self::default();
        for (player_id, entry) in directory.iter_sorted() {
            let full_name = entry.full_name.as_deref().filter(|n| !n.is_empty());
            let name = match (full_name, entry.first_name.as_deref(), entry.last_name.as_deref()) {
                (Some(full), _, _) => full.to_string(),
                (None, Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                    format!("{first} {last}")
                }
                _ => continue,
            };
            let key = normalize_name(&name);
            let team = entry.team_or_empty().to_ascii_uppercase();
            index
                .by_name
                .entry(key.clone())
                .or_insert_with(|| player_id.clone());
            index.by_name_team.insert((key, team), player_id.clone());
        }
        index
    }

    pub fn len(&self) -> usize {
        self.by_name_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name_team.is_empty()
    }

    /// Matches on name and team. A row without a team falls back to the
    /// name alone.
    pub fn lookup(&self, name: &str, team: &str) -> Option<&str> {
        let key = normalize_name(name);
        let team = team.to_ascii_uppercase();
        if let Some(id) = self.by_name_team.get(&(key.clone(), team.clone())) {
            return Some(id.as_str());
        }
        if team.is_empty() {
            return self.by_name.get(&key).map(String::as_str);
        }
        None
    }
}

/// One FantasyPros row before matching.
#[derive(Debug, Clone, PartialEq)]
pub struct FantasyProsRow {
    pub name: String,
    pub team: String,
    pub points: f64,
}

fn column_indexes(headers: &StringRecord, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == *name)
        })
        .collect()
}

/// First non-empty value among `columns`.
fn first_value<'r>(record: &'r StringRecord, columns: &[usize]) -> &'r str {
    columns
        .iter()
        .filter_map(|&idx| record.get(idx))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// Parses one position's CSV. Rows without a player name are skipped and
/// unparsable points count as 0.
pub fn parse_projection_csv(text: &str) -> Result<Vec<FantasyProsRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let player_cols = column_indexes(&headers, &PLAYER_COLUMNS);
    let team_cols = column_indexes(&headers, &TEAM_COLUMNS);
    let points_cols = column_indexes(&headers, &POINTS_COLUMNS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = first_value(&record, &player_cols);
        if name.is_empty() {
            continue;
        }
        rows.push(FantasyProsRow {
            name: name.to_string(),
            team: first_value(&record, &team_cols).to_ascii_uppercase(),
            points: first_value(&record, &points_cols).parse().unwrap_or(0.0),
        });
    }
    Ok(rows)
}

fn round_points(points: f64) -> f64 {
    (points * 100.0).round() / 100.0
}

/// Fetches every position from FantasyPros and keeps the rows that match a
/// Sleeper player. A position whose download or parse fails is logged and
/// skipped.
#[instrument(skip(client, directory))]
pub async fn fetch_fantasypros_projections(
    client: &FantasyProsClient,
    directory: &PlayerDirectory,
    season: u32,
    week: u32,
    scoring: &str,
) -> Result<WeekProjections, AppError> {
    let index = PlayerIndex::build(directory);
    debug!("Player index holds {} name/team keys", index.len());

    let mut projections = Vec::new();
    for position in FANTASYPROS_POSITIONS {
        let rows = match client
            .position_csv(position, week, scoring)
            .await
            .and_then(|text| parse_projection_csv(&text))
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Skipping FantasyPros {position} projections: {e}");
                continue;
            }
        };

        let mut unmatched = 0;
        for row in &rows {
            match index.lookup(&row.name, &row.team) {
                Some(player_id) => projections.push(Projection {
                    player_id: player_id.to_string(),
                    position: position.to_string(),
                    points: round_points(row.points),
                }),
                None => {
                    debug!("No Sleeper player for {} ({})", row.name, row.team);
                    unmatched += 1;
                }
            }
        }
        info!("{position}: {} rows, {unmatched} unmatched", rows.len());
    }

    Ok(WeekProjections {
        season,
        week,
        projections,
    })
}
