use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use super::NarrativeOptions;
use super::llm::{CompletionRequest, LlmClient};
use super::prompts::{MATCHUP_PREDICTIONS_SYSTEM_PROMPT, build_matchup_predictions_prompt};
use super::schema::{Prediction, SpicyMatchup, parse_matchup_predictions};
use crate::constants::temperature;
use crate::error::AppError;
use crate::site::{LeagueTarget, SiteLayout, WeekRankings, pair_matchups, write_json_file};
use crate::sleeper::api::build_matchups_url;
use crate::sleeper::{PlayerDirectoryCache, SleeperClient};

/// Contents of `matchup_predictions.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchupPredictions {
    pub league_id: String,
    pub season: u32,
    pub week: u32,
    pub predictions: Vec<Prediction>,
    pub spicy_matchup: SpicyMatchup,
}

/// Generates the week's predictions and writes `matchup_predictions.json`.
///
/// Ranks come from the week's `power_rankings.json` when it exists.
/// Nothing is written unless the model's answer passes validation.
#[instrument(skip(sleeper, llm, players, target, layout, options), fields(target = %target))]
pub async fn generate_matchup_predictions(
    sleeper: &SleeperClient,
    llm: &LlmClient,
    players: &mut PlayerDirectoryCache,
    target: &LeagueTarget,
    layout: &SiteLayout,
    options: &NarrativeOptions,
) -> Result<PathBuf, AppError> {
    let league = sleeper.league(&target.league_id).await?;
    let entries = sleeper.matchups(&target.league_id, target.week).await?;
    let directory = players.get_or_fetch(sleeper).await?;

    let ranks: HashMap<u32, u32> =
        match WeekRankings::load_if_exists(&layout.power_rankings(target.season, target.week))
            .await?
        {
            Some(rankings) => rankings.ranks_by_roster(),
            None => {
                warn!("No power rankings for week {}; matchups go unranked", target.week);
                HashMap::new()
            }
        };

    let pairs = pair_matchups(&entries, &league.sorted_roster_ids());
    if pairs.is_empty() {
        let url = build_matchups_url(sleeper.api_base(), &target.league_id, target.week);
        return Err(AppError::api_no_data("No matchups to predict", url));
    }

    let user_prompt = build_matchup_predictions_prompt(target, &league, &pairs, &ranks, directory);
    let request = CompletionRequest {
        model: &options.model,
        system_prompt: MATCHUP_PREDICTIONS_SYSTEM_PROMPT,
        user_prompt: &user_prompt,
        temperature: temperature::MATCHUP_PREDICTIONS,
        enable_web: options.enable_web,
    };
    let text = llm.complete_json(&request).await?;
    let parsed = parse_matchup_predictions(&text, &league, &pairs)?;
    info!("Model predicted {} matchups", parsed.predictions.len());

    let path = layout.matchup_predictions(target.season, target.week);
    let file = MatchupPredictions {
        league_id: target.league_id.clone(),
        season: target.season,
        week: target.week,
        predictions: parsed.predictions,
        spicy_matchup: parsed.spicy_matchup,
    };
    write_json_file(&path, &file).await?;
    Ok(path)
}
