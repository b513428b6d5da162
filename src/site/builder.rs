//! Builds every non-narrative data file for one league week.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, instrument};

use super::LeagueTarget;
use super::files::{SiteLayout, write_json_file};
use super::history::update_history;
use super::matchups::{WeekMatchups, build_week_matchups};
use super::rankings::{WeekRankings, baseline_rankings};
use super::snapshots::write_season_snapshots;
use crate::error::AppError;
use crate::sleeper::models::SleeperMatchup;
use crate::sleeper::{League, PlayerDirectory, PlayerDirectoryCache, SleeperClient, Team};

/// Contents of `teams.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamsFile {
    pub league_id: String,
    pub teams: Vec<Team>,
}

/// The week's data files, built from fetched league data.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFiles {
    pub teams: TeamsFile,
    pub matchups: WeekMatchups,
    pub rankings: WeekRankings,
}

impl SiteFiles {
    pub fn build(target: &LeagueTarget, league: &League, entries: &[SleeperMatchup]) -> Self {
        Self {
            teams: TeamsFile {
                league_id: target.league_id.clone(),
                teams: league.teams(),
            },
            matchups: build_week_matchups(target, league, entries),
            rankings: WeekRankings::new(target, baseline_rankings(league)),
        }
    }

    /// Writes teams, matchups and rankings and returns their paths.
    pub async fn write(&self, layout: &SiteLayout) -> Result<Vec<PathBuf>, AppError> {
        let season = self.rankings.season;
        let week = self.rankings.week;
        let written = vec![
            layout.teams(),
            layout.matchups(season, week),
            layout.power_rankings(season, week),
        ];
        write_json_file(&written[0], &self.teams).await?;
        write_json_file(&written[1], &self.matchups).await?;
        write_json_file(&written[2], &self.rankings).await?;
        Ok(written)
    }
}

/// Writes the site files for `target` from local data, then folds the week's
/// ranks into the history.
pub async fn write_site_data(
    target: &LeagueTarget,
    league: &League,
    entries: &[SleeperMatchup],
    directory: &PlayerDirectory,
    layout: &SiteLayout,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = SiteFiles::build(target, league, entries).write(layout).await?;

    write_season_snapshots(layout, target.season, league, directory).await?;
    if !league.rosters.is_empty() {
        written.push(layout.standings(target.season));
        written.push(layout.rosters_min(target.season));
    }

    update_history(layout, target.season, target.week).await?;
    written.push(layout.history(target.season));
    Ok(written)
}

/// Fetches the league week and writes every site data file except the
/// narrative ones. Does not call the LLM.
#[instrument(skip(client, players, target, layout), fields(target = %target))]
pub async fn build_site_data(
    client: &SleeperClient,
    players: &mut PlayerDirectoryCache,
    target: &LeagueTarget,
    layout: &SiteLayout,
) -> Result<Vec<PathBuf>, AppError> {
    let league = client.league(&target.league_id).await?;
    let entries = client.matchups(&target.league_id, target.week).await?;
    let directory = players.get_or_fetch(client).await?;

    info!(
        "Building site data for {} rosters, {} matchup entries",
        league.rosters.len(),
        entries.len()
    );
    write_site_data(target, &league, &entries, directory, layout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::History;
    use crate::site::files::read_json_file;
    use crate::sleeper::league::fixtures::sample_league;
    use crate::sleeper::player_directory::fixtures::sample_directory;
    use tempfile::tempdir;

    fn entries() -> Vec<SleeperMatchup> {
        [(1, 1), (2, 2), (3, 1), (4, 2)]
            .into_iter()
            .map(|(roster_id, matchup_id)| SleeperMatchup {
                roster_id,
                matchup_id: Some(matchup_id),
                points: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let temp_dir = tempdir().unwrap();
        let layout = SiteLayout::new(temp_dir.path());
        let target = LeagueTarget::new("L1", 2025, 2);
        let league = sample_league();
        let directory = sample_directory();

        let written = write_site_data(&target, &league, &entries(), &directory, &layout)
            .await
            .unwrap();
        let first: Vec<Vec<u8>> = written.iter().map(|p| std::fs::read(p).unwrap()).collect();

        write_site_data(&target, &league, &entries(), &directory, &layout)
            .await
            .unwrap();
        let second: Vec<Vec<u8>> = written.iter().map(|p| std::fs::read(p).unwrap()).collect();

        assert_eq!(written.len(), 6);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_first_run_creates_single_history_week() {
        let temp_dir = tempdir().unwrap();
        let layout = SiteLayout::new(temp_dir.path());
        let target = LeagueTarget::new("L1", 2025, 1);

        write_site_data(&target, &sample_league(), &entries(), &sample_directory(), &layout)
            .await
            .unwrap();

        let history: History = read_json_file(&layout.history(2025)).await.unwrap();
        assert_eq!(history.season, 2025);
        assert_eq!(history.weeks.len(), 1);
        let ranks: Vec<(u32, u32)> = history.weeks[&1]
            .iter()
            .map(|e| (e.roster_id, e.rank))
            .collect();
        assert_eq!(ranks, vec![(2, 1), (3, 2), (1, 3), (4, 4)]);
    }

    #[test]
    fn test_site_files_contents() {
        let target = LeagueTarget::new("L1", 2025, 1);
        let files = SiteFiles::build(&target, &sample_league(), &entries());
        assert_eq!(files.teams.teams.len(), 3);
        assert_eq!(files.matchups.matchups[0].home_roster_id, 1);
        assert_eq!(files.matchups.matchups[0].away_roster_id, 3);
        assert_eq!(files.rankings.rankings.len(), 4);
    }
}
