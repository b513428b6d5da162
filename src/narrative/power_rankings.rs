use std::path::PathBuf;
use tracing::{info, instrument};

use super::NarrativeOptions;
use super::llm::{CompletionRequest, LlmClient};
use super::prompts::{POWER_RANKINGS_SYSTEM_PROMPT, build_power_rankings_prompt};
use super::schema::parse_power_rankings;
use crate::constants::temperature;
use crate::error::AppError;
use crate::site::{LeagueTarget, SiteLayout, WeekRankings, write_json_file};
use crate::sleeper::{PlayerDirectoryCache, SleeperClient};

/// Generates the week's power rankings and writes `power_rankings.json`.
///
/// Nothing is written unless the model's answer passes validation.
#[instrument(skip(sleeper, llm, players, target, layout, options), fields(target = %target))]
pub async fn generate_power_rankings(
    sleeper: &SleeperClient,
    llm: &LlmClient,
    players: &mut PlayerDirectoryCache,
    target: &LeagueTarget,
    layout: &SiteLayout,
    options: &NarrativeOptions,
) -> Result<PathBuf, AppError> {
    let league = sleeper.league(&target.league_id).await?;
    let directory = players.get_or_fetch(sleeper).await?;

    let user_prompt = build_power_rankings_prompt(target, &league, directory);
    let request = CompletionRequest {
        model: &options.model,
        system_prompt: POWER_RANKINGS_SYSTEM_PROMPT,
        user_prompt: &user_prompt,
        temperature: temperature::POWER_RANKINGS,
        enable_web: options.enable_web,
    };
    let text = llm.complete_json(&request).await?;
    let rankings = parse_power_rankings(&text, &league)?;
    info!("Model ranked {} teams", rankings.len());

    let path = layout.power_rankings(target.season, target.week);
    write_json_file(&path, &WeekRankings::new(target, rankings)).await?;
    Ok(path)
}
