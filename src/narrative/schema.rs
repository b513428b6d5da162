//! Strict parsing of model output.
//!
//! Model text is parsed into typed records in which every required field is
//! non-optional, then checked against the league: roster ids must exist,
//! each roster is ranked once, ranks run 1..=n, predictions cover exactly
//! the week's matchups and predicted winners play in their game.
//! Any failure is `AppError::SchemaMismatch`.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};

use crate::error::AppError;
use crate::site::{Analysis, MatchupPair, RankingEntry, Source};
use crate::sleeper::League;
use crate::sleeper::league::fallback_team_name;

pub const POWER_RANKINGS_SCHEMA: &str = "power rankings";
pub const MATCHUP_PREDICTIONS_SCHEMA: &str = "matchup predictions";

/// Removes a surrounding Markdown code fence (```json ... ```), if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}

/// Parses model text into `T`, reporting any mismatch against `schema`.
pub fn parse_model_json<T: DeserializeOwned>(schema: &str, text: &str) -> Result<T, AppError> {
    serde_json::from_str(strip_code_fences(text))
        .map_err(|e| AppError::schema_mismatch(schema, e.to_string()))
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelRanking {
    pub roster_id: u32,
    pub rank: u32,
    pub summary: String,
    pub analysis: Analysis,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelRankings {
    pub rankings: Vec<ModelRanking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub home_roster_id: u32,
    pub away_roster_id: u32,
    pub predicted_winner_roster_id: u32,
    pub reasoning: String,
}

impl Prediction {
    pub fn pair(&self) -> MatchupPair {
        MatchupPair {
            home_roster_id: self.home_roster_id,
            away_roster_id: self.away_roster_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpicyMatchup {
    pub home_roster_id: u32,
    pub away_roster_id: u32,
    pub why: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelPredictions {
    pub predictions: Vec<Prediction>,
    pub spicy_matchup: SpicyMatchup,
}

fn known_rosters(league: &League) -> HashSet<u32> {
    league.rosters.iter().map(|r| r.roster_id).collect()
}

fn check_known(
    schema: &str,
    known: &HashSet<u32>,
    roster_id: u32,
    field: &str,
) -> Result<(), AppError> {
    if known.contains(&roster_id) {
        Ok(())
    } else {
        Err(AppError::schema_mismatch(
            schema,
            format!("{field} {roster_id} is not a roster in this league"),
        ))
    }
}

/// Parses and validates power rankings, returning entries sorted by rank.
/// A missing `team_name` is filled in from the league.
pub fn parse_power_rankings(text: &str, league: &League) -> Result<Vec<RankingEntry>, AppError> {
    let schema = POWER_RANKINGS_SCHEMA;
    let parsed: ModelRankings = parse_model_json(schema, text)?;
    if parsed.rankings.is_empty() {
        return Err(AppError::schema_mismatch(schema, "rankings list is empty"));
    }

    let known = known_rosters(league);
    let names: HashMap<u32, String> = league.team_names_by_roster();
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(parsed.rankings.len());

    for ranking in parsed.rankings {
        check_known(schema, &known, ranking.roster_id, "roster_id")?;
        if !seen.insert(ranking.roster_id) {
            return Err(AppError::schema_mismatch(
                schema,
                format!("roster_id {} is ranked more than once", ranking.roster_id),
            ));
        }
        let team_name = ranking
            .team_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| names.get(&ranking.roster_id).cloned())
            .unwrap_or_else(|| fallback_team_name(ranking.roster_id));
        entries.push(RankingEntry {
            roster_id: ranking.roster_id,
            team_name,
            rank: ranking.rank,
            summary: ranking.summary,
            analysis: ranking.analysis,
            sources: ranking.sources,
        });
    }

    entries.sort_by_key(|entry| entry.rank);
    check_rank_sequence(schema, &entries)?;
    Ok(entries)
}

/// Ranks sorted ascending must read exactly 1, 2, ..., n.
fn check_rank_sequence(schema: &str, sorted: &[RankingEntry]) -> Result<(), AppError> {
    for (expected, entry) in (1u32..).zip(sorted) {
        if entry.rank != expected {
            return Err(AppError::schema_mismatch(
                schema,
                format!(
                    "ranks must run 1..={} without gaps or ties (roster_id {} has rank {}, expected {})",
                    sorted.len(),
                    entry.roster_id,
                    entry.rank,
                    expected
                ),
            ));
        }
    }
    Ok(())
}

/// Parses and validates matchup predictions against the week's `pairs`.
///
/// Every pair must be predicted exactly once and no other pairing may appear.
pub fn parse_matchup_predictions(
    text: &str,
    league: &League,
    pairs: &[MatchupPair],
) -> Result<ModelPredictions, AppError> {
    let schema = MATCHUP_PREDICTIONS_SCHEMA;
    let parsed: ModelPredictions = parse_model_json(schema, text)?;
    if parsed.predictions.is_empty() {
        return Err(AppError::schema_mismatch(schema, "predictions list is empty"));
    }

    let known = known_rosters(league);
    for prediction in &parsed.predictions {
        check_known(schema, &known, prediction.home_roster_id, "home_roster_id")?;
        check_known(schema, &known, prediction.away_roster_id, "away_roster_id")?;
        if !prediction.pair().involves(prediction.predicted_winner_roster_id) {
            return Err(AppError::schema_mismatch(
                schema,
                format!(
                    "predicted winner {} is not in matchup {} vs {}",
                    prediction.predicted_winner_roster_id,
                    prediction.home_roster_id,
                    prediction.away_roster_id
                ),
            ));
        }
    }
    check_pair_coverage(schema, &parsed.predictions, pairs)?;

    let spicy = MatchupPair {
        home_roster_id: parsed.spicy_matchup.home_roster_id,
        away_roster_id: parsed.spicy_matchup.away_roster_id,
    };
    check_known(schema, &known, spicy.home_roster_id, "spicy_matchup.home_roster_id")?;
    check_known(schema, &known, spicy.away_roster_id, "spicy_matchup.away_roster_id")?;
    if !parsed.predictions.iter().any(|p| p.pair().same_teams(&spicy)) {
        return Err(AppError::schema_mismatch(
            schema,
            format!(
                "spicy matchup {} vs {} is not one of the predicted matchups",
                spicy.home_roster_id, spicy.away_roster_id
            ),
        ));
    }

    Ok(parsed)
}

fn check_pair_coverage(
    schema: &str,
    predictions: &[Prediction],
    pairs: &[MatchupPair],
) -> Result<(), AppError> {
    let mut predicted = vec![false; pairs.len()];
    for prediction in predictions {
        let pair = prediction.pair();
        let Some(idx) = pairs.iter().position(|p| p.same_teams(&pair)) else {
            return Err(AppError::schema_mismatch(
                schema,
                format!(
                    "{} vs {} is not a matchup this week",
                    pair.home_roster_id, pair.away_roster_id
                ),
            ));
        };
        if std::mem::replace(&mut predicted[idx], true) {
            return Err(AppError::schema_mismatch(
                schema,
                format!(
                    "matchup {} vs {} is predicted more than once",
                    pair.home_roster_id, pair.away_roster_id
                ),
            ));
        }
    }

    if let Some(missing) = pairs.iter().zip(&predicted).find(|(_, done)| !**done) {
        return Err(AppError::schema_mismatch(
            schema,
            format!(
                "matchup {} vs {} has no prediction",
                missing.0.home_roster_id, missing.0.away_roster_id
            ),
        ));
    }
    Ok(())
}
