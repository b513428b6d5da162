//! Flat CSV tables of a league's rosters and owners.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::constants::UNKNOWN_TEAM_NAME;
use crate::error::AppError;
use crate::site::write_file_atomic;
use crate::sleeper::models::SleeperRoster;
use crate::sleeper::{League, PlayerDirectory, PlayerDirectoryCache, SleeperClient};

const ROSTER_HEADERS: [&str; 10] = [
    "league_id",
    "roster_id",
    "owner_user_id",
    "owner_display_name",
    "team_name",
    "player_id",
    "player_name",
    "position",
    "nfl_team",
    "is_starter",
];

const TEAM_HEADERS: [&str; 5] = [
    "league_id",
    "roster_id",
    "owner_user_id",
    "owner_display_name",
    "team_name",
];

/// One rostered player.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterPlayerRow {
    pub league_id: String,
    pub roster_id: u32,
    pub owner_user_id: String,
    pub owner_display_name: String,
    pub team_name: String,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub nfl_team: String,
    pub is_starter: bool,
}

/// One roster with its owner.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamRow {
    pub league_id: String,
    pub roster_id: u32,
    pub owner_user_id: String,
    pub owner_display_name: String,
    pub team_name: String,
}

/// Paths of the two files written by [`export_league_to_csv`].
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub rosters_csv: PathBuf,
    pub teams_csv: PathBuf,
}

/// Owner fields of a roster: user id, display name, team name.
fn owner_fields(league: &League, roster: &SleeperRoster) -> (String, String, String) {
    match league.owner_of(roster) {
        Some(user) => (user.user_id.clone(), user.display_name_or_empty(), user.team_name()),
        None => (
            roster.owner_id_or_empty().to_string(),
            String::new(),
            UNKNOWN_TEAM_NAME.to_string(),
        ),
    }
}

/// One row per (roster, player) pair in API roster order.
pub fn roster_player_rows(league: &League, directory: &PlayerDirectory) -> Vec<RosterPlayerRow> {
    let mut rows = Vec::new();
    for roster in &league.rosters {
        let (owner_user_id, owner_display_name, team_name) = owner_fields(league, roster);
        for player_id in roster.player_ids() {
            let player = directory.resolve_or_blank(player_id);
            rows.push(RosterPlayerRow {
                league_id: league.league_id.clone(),
                roster_id: roster.roster_id,
                owner_user_id: owner_user_id.clone(),
                owner_display_name: owner_display_name.clone(),
                team_name: team_name.clone(),
                player_id: player_id.clone(),
                player_name: player.name,
                position: player.position,
                nfl_team: player.nfl_team,
                is_starter: roster.is_starter(player_id),
            });
        }
    }
    rows
}

/// One row per roster in API roster order.
pub fn team_rows(league: &League) -> Vec<TeamRow> {
    league
        .rosters
        .iter()
        .map(|roster| {
            let (owner_user_id, owner_display_name, team_name) = owner_fields(league, roster);
            TeamRow {
                league_id: league.league_id.clone(),
                roster_id: roster.roster_id,
                owner_user_id,
                owner_display_name,
                team_name,
            }
        })
        .collect()
}

/// Writes a header row followed by `rows`. The header is written even when
/// there are no rows.
pub fn write_rows<W: Write, R: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[R],
) -> Result<(), AppError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_rosters_csv<W: Write>(
    writer: W,
    league: &League,
    directory: &PlayerDirectory,
) -> Result<(), AppError> {
    write_rows(writer, &ROSTER_HEADERS, &roster_player_rows(league, directory))
}

pub fn write_teams_csv<W: Write>(writer: W, league: &League) -> Result<(), AppError> {
    write_rows(writer, &TEAM_HEADERS, &team_rows(league))
}

/// Writes `<league_id>_rosters.csv` and `<league_id>_teams.csv` into `out_dir`.
///
/// Both tables are rendered in memory first, then each file is replaced
/// atomically.
pub async fn write_league_csvs(
    league: &League,
    directory: &PlayerDirectory,
    out_dir: &Path,
) -> Result<CsvExport, AppError> {
    let rosters_csv = out_dir.join(format!("{}_rosters.csv", league.league_id));
    let teams_csv = out_dir.join(format!("{}_teams.csv", league.league_id));

    let mut rosters = Vec::new();
    write_rosters_csv(&mut rosters, league, directory)?;
    let mut teams = Vec::new();
    write_teams_csv(&mut teams, league)?;

    write_file_atomic(&rosters_csv, &rosters).await?;
    write_file_atomic(&teams_csv, &teams).await?;
    info!(
        "Exported {} rosters for league {}",
        league.rosters.len(),
        league.league_id
    );

    Ok(CsvExport {
        rosters_csv,
        teams_csv,
    })
}

/// Fetches the league and player directory, then writes both CSV files.
#[instrument(skip(client, players))]
pub async fn export_league_to_csv(
    client: &SleeperClient,
    players: &mut PlayerDirectoryCache,
    league_id: &str,
    out_dir: &Path,
) -> Result<CsvExport, AppError> {
    let league = client.league(league_id).await?;
    let directory = players.get_or_fetch(client).await?;
    write_league_csvs(&league, directory, out_dir).await
}
