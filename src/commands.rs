//! Command handlers. Each one is a single sequential fetch → transform →
//! write pass; any error aborts the run.

use chrono::{Datelike, Local};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::cli::{Cli, Command, ConfigArgs, LlmArgs, ProjectionSource, SeasonWeekArgs, WeekArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::export::export_league_to_csv;
use crate::http::create_http_client_with_timeout;
use crate::narrative::{
    LlmClient, NarrativeOptions, generate_matchup_predictions, generate_power_rankings,
};
use crate::projections::{
    FantasyProsClient, fetch_fantasypros_projections, fetch_projections, write_week_projections,
};
use crate::site::snapshots::write_season_snapshots;
use crate::site::{LeagueTarget, SiteLayout, build_site_data, update_history};
use crate::sleeper::models::NflState;
use crate::sleeper::{PlayerDirectoryCache, SleeperClient};

/// Per-run state shared by the data commands. One HTTP client serves every
/// upstream the run talks to.
struct Runtime {
    config: Config,
    http: Client,
    sleeper: SleeperClient,
    players: PlayerDirectoryCache,
}

impl Runtime {
    async fn load() -> Result<Self, AppError> {
        let config = Config::load().await?;
        let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
        let sleeper = SleeperClient::from_config(&config, http.clone());
        Ok(Self {
            config,
            http,
            sleeper,
            players: PlayerDirectoryCache::new(),
        })
    }

    /// Builds the LLM client before any Sleeper traffic, so a missing API
    /// key fails the run up front.
    fn narrative_setup(&self, args: &LlmArgs) -> Result<(LlmClient, NarrativeOptions), AppError> {
        let client = LlmClient::from_config(&self.config, self.http.clone())?;
        let options = NarrativeOptions {
            model: self.config.resolve_model(args.model.as_deref()),
            enable_web: args.enable_web,
        };
        Ok((client, options))
    }
}

/// Dispatches the parsed command line.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Config(args) => handle_config_command(&args).await?,
        Command::ExportCsv { league_id, out_dir } => {
            let mut rt = Runtime::load().await?;
            let league_id = rt.config.resolve_league_id(league_id.as_deref())?;
            let export = export_league_to_csv(
                &rt.sleeper,
                &mut rt.players,
                &league_id,
                Path::new(&out_dir),
            )
            .await?;
            print_written(&[export.rosters_csv, export.teams_csv]);
        }
        Command::BuildSite(args) => {
            let mut rt = Runtime::load().await?;
            let target = resolve_target(&rt.sleeper, &rt.config, &args).await?;
            let layout = layout_for(&rt.config, &args.target);
            let written = build_site_data(&rt.sleeper, &mut rt.players, &target, &layout).await?;
            print_written(&written);
        }
        Command::UpdateHistory(args) => {
            let mut rt = Runtime::load().await?;
            handle_update_history(&rt.sleeper, &mut rt.players, &rt.config, &args).await?;
        }
        Command::PowerRankings { week, llm } => {
            let mut rt = Runtime::load().await?;
            let (llm_client, options) = rt.narrative_setup(&llm)?;
            let target = resolve_target(&rt.sleeper, &rt.config, &week).await?;
            let layout = layout_for(&rt.config, &week.target);
            let path = generate_power_rankings(
                &rt.sleeper,
                &llm_client,
                &mut rt.players,
                &target,
                &layout,
                &options,
            )
            .await?;
            print_written(&[path]);
        }
        Command::PredictMatchups { week, llm } => {
            let mut rt = Runtime::load().await?;
            let (llm_client, options) = rt.narrative_setup(&llm)?;
            let target = resolve_target(&rt.sleeper, &rt.config, &week).await?;
            let layout = layout_for(&rt.config, &week.target);
            let path = generate_matchup_predictions(
                &rt.sleeper,
                &llm_client,
                &mut rt.players,
                &target,
                &layout,
                &options,
            )
            .await?;
            print_written(&[path]);
        }
        Command::Projections {
            target,
            source,
            season_type,
            scoring,
        } => {
            let mut rt = Runtime::load().await?;
            let layout = layout_for(&rt.config, &target);
            let projections = match source {
                ProjectionSource::Sleeper => {
                    let (season, week, season_type) = resolve_projection_week(
                        &rt.sleeper,
                        target.season,
                        target.week,
                        season_type.as_deref(),
                    )
                    .await?;
                    fetch_projections(&rt.sleeper, season, week, &season_type).await?
                }
                ProjectionSource::FantasyPros => {
                    let (season, week) =
                        resolve_season_week(&rt.sleeper, target.season, target.week).await?;
                    let fantasypros =
                        FantasyProsClient::new(rt.http.clone(), rt.config.fantasypros_base.clone());
                    let directory = rt.players.get_or_fetch(&rt.sleeper).await?;
                    fetch_fantasypros_projections(&fantasypros, directory, season, week, &scoring)
                        .await?
                }
            };
            let path = write_week_projections(&layout, &projections).await?;
            print_written(&[path]);
        }
    }

    Ok(())
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("Wrote: {}", path.display());
    }
}

fn layout_for(config: &Config, args: &SeasonWeekArgs) -> SiteLayout {
    SiteLayout::new(config.resolve_docs_dir(args.docs_dir.as_deref()))
}

/// Fills in a missing season or week from Sleeper's NFL state. The season
/// falls back to the current calendar year when the state has none.
pub async fn resolve_season_week(
    sleeper: &SleeperClient,
    season: Option<u32>,
    week: Option<u32>,
) -> Result<(u32, u32), AppError> {
    if let (Some(season), Some(week)) = (season, week) {
        return Ok((season, week));
    }

    let state = sleeper.nfl_state().await?;
    Ok(season_week_from_state(&state, season, week))
}

fn season_week_from_state(state: &NflState, season: Option<u32>, week: Option<u32>) -> (u32, u32) {
    let season = season
        .or_else(|| state.season_year())
        .unwrap_or_else(|| Local::now().year().unsigned_abs());
    let week = week.unwrap_or_else(|| state.current_week());
    info!("Using season {season} week {week}");
    (season, week)
}

/// Season, week and season type for a Sleeper projections run. The NFL
/// state is requested at most once, and not at all when all three are given.
pub async fn resolve_projection_week(
    sleeper: &SleeperClient,
    season: Option<u32>,
    week: Option<u32>,
    season_type: Option<&str>,
) -> Result<(u32, u32, String), AppError> {
    let season_type = season_type.filter(|s| !s.is_empty());
    if let (Some(season), Some(week), Some(season_type)) = (season, week, season_type) {
        return Ok((season, week, season_type.to_string()));
    }

    let state = sleeper.nfl_state().await?;
    let (season, week) = season_week_from_state(&state, season, week);
    let season_type = season_type
        .map(str::to_string)
        .unwrap_or_else(|| state.season_type_or_default());
    Ok((season, week, season_type))
}

pub async fn resolve_target(
    sleeper: &SleeperClient,
    config: &Config,
    args: &WeekArgs,
) -> Result<LeagueTarget, AppError> {
    let league_id = config.resolve_league_id(args.league_id.as_deref())?;
    let (season, week) = resolve_season_week(sleeper, args.target.season, args.target.week).await?;
    Ok(LeagueTarget::new(league_id, season, week))
}

/// Updates the history from the week's rankings, then refreshes standings
/// and minimal rosters for the league named in the week file.
#[instrument(skip_all)]
pub async fn handle_update_history(
    sleeper: &SleeperClient,
    players: &mut PlayerDirectoryCache,
    config: &Config,
    args: &SeasonWeekArgs,
) -> Result<(), AppError> {
    let (season, week) = resolve_season_week(sleeper, args.season, args.week).await?;
    let layout = layout_for(config, args);

    let snapshot = update_history(&layout, season, week).await?;
    println!("Updated: {}", layout.history(season).display());

    let league = sleeper.league(&snapshot.league_id).await?;
    let directory = players.get_or_fetch(sleeper).await?;
    write_season_snapshots(&layout, season, &league, directory).await?;
    if !league.rosters.is_empty() {
        print_written(&[layout.standings(season), layout.rosters_min(season)]);
    }
    Ok(())
}

/// Handles `config --list` and the `config --set-*` updates.
pub async fn handle_config_command(args: &ConfigArgs) -> Result<(), AppError> {
    if args.has_updates() {
        let config_path = Config::get_config_path();
        update_config_file(args, &config_path).await?;
        println!("Config updated successfully!");
    }

    if args.list || !args.has_updates() {
        Config::display().await?;
    }
    Ok(())
}

/// Applies `config --set-*` flags to the file at `config_path`, starting from
/// defaults when it does not exist yet. Environment overrides are not
/// written back.
pub async fn update_config_file(args: &ConfigArgs, config_path: &str) -> Result<Config, AppError> {
    let mut config = if Path::new(config_path).exists() {
        Config::load_from_path(config_path).await?
    } else {
        Config::default()
    };

    if let Some(league_id) = &args.league_id {
        config.league_id = Some(league_id.clone());
    }

    if let Some(docs_dir) = &args.docs_dir {
        config.docs_dir = docs_dir.clone();
    }

    if let Some(new_log_path) = &args.log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save_to_path(config_path).await?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::http_client::create_test_http_client;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_explicit_season_week_skip_network() {
        let sleeper = SleeperClient::new(create_test_http_client(), "http://127.0.0.1:9");
        let resolved = resolve_season_week(&sleeper, Some(2024), Some(17)).await.unwrap();
        assert_eq!(resolved, (2024, 17));
    }

    #[tokio::test]
    async fn test_defaults_from_nfl_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/state/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "season": "2025", "week": 0, "season_type": "pre"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sleeper = SleeperClient::new(create_test_http_client(), server.uri());
        let resolved = resolve_season_week(&sleeper, None, None).await.unwrap();
        assert_eq!(resolved, (2025, 1));
    }

    #[tokio::test]
    async fn test_projection_week_reads_state_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/state/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "season": "2025", "week": 6, "season_type": "regular"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sleeper = SleeperClient::new(create_test_http_client(), server.uri());
        let resolved = resolve_projection_week(&sleeper, None, None, None).await.unwrap();
        assert_eq!(resolved, (2025, 6, "regular".to_string()));
    }

    #[tokio::test]
    async fn test_projection_week_flags_win_over_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/state/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "season": "2025", "week": 6, "season_type": "regular"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sleeper = SleeperClient::new(create_test_http_client(), server.uri());
        let resolved = resolve_projection_week(&sleeper, Some(2024), None, Some("post"))
            .await
            .unwrap();
        assert_eq!(resolved, (2024, 6, "post".to_string()));

        let offline = SleeperClient::new(create_test_http_client(), "http://127.0.0.1:9");
        let resolved = resolve_projection_week(&offline, Some(2024), Some(18), Some("regular"))
            .await
            .unwrap();
        assert_eq!(resolved, (2024, 18, "regular".to_string()));
    }

    #[tokio::test]
    async fn test_update_config_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_string_lossy().to_string();

        let args = ConfigArgs {
            league_id: Some("4242".to_string()),
            docs_dir: Some("site".to_string()),
            ..ConfigArgs::default()
        };
        update_config_file(&args, &config_path).await.unwrap();

        let clear = ConfigArgs {
            clear_log_file_path: true,
            ..ConfigArgs::default()
        };
        let config = update_config_file(&clear, &config_path).await.unwrap();
        assert_eq!(config.league_id.as_deref(), Some("4242"));
        assert_eq!(config.docs_dir, "site");
        assert_eq!(config.log_file_path, None);

        let loaded = Config::load_from_path(&config_path).await.unwrap();
        assert_eq!(loaded, config);
    }
}
