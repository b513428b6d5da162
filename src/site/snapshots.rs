//! Season-level snapshots refreshed alongside the history: standings and the
//! starters of every roster.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::files::{SiteLayout, write_json_file};
use crate::error::AppError;
use crate::sleeper::{League, PlayerDirectory, ResolvedPlayer};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub roster_id: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub pf: f64,
    pub pa: f64,
}

/// Contents of `standings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonStandings {
    pub season: u32,
    pub standings: Vec<Standing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimalRoster {
    pub roster_id: u32,
    pub starters: Vec<ResolvedPlayer>,
}

/// Contents of `rosters_min.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonRosters {
    pub season: u32,
    pub rosters: Vec<MinimalRoster>,
}

/// One standing per roster in API roster order.
pub fn standings(season: u32, league: &League) -> SeasonStandings {
    let standings = league
        .rosters
        .iter()
        .map(|roster| {
            let record = roster.record();
            Standing {
                roster_id: roster.roster_id,
                wins: record.wins,
                losses: record.losses,
                ties: record.ties,
                pf: record.points_for(),
                pa: record.points_against(),
            }
        })
        .collect();
    SeasonStandings { season, standings }
}

/// Starters of every roster, resolved through the player directory. Unknown
/// ids keep the id as the name.
pub fn minimal_rosters(season: u32, league: &League, directory: &PlayerDirectory) -> SeasonRosters {
    let rosters = league
        .rosters
        .iter()
        .map(|roster| MinimalRoster {
            roster_id: roster.roster_id,
            starters: roster
                .starter_ids()
                .iter()
                .map(|id| directory.resolve_or_id(id))
                .collect(),
        })
        .collect();
    SeasonRosters { season, rosters }
}

/// Writes `standings.json` and `rosters_min.json` for the season. A league
/// without rosters writes neither.
#[instrument(skip(layout, league, directory), fields(league_id = %league.league_id))]
pub async fn write_season_snapshots(
    layout: &SiteLayout,
    season: u32,
    league: &League,
    directory: &PlayerDirectory,
) -> Result<(), AppError> {
    if league.rosters.is_empty() {
        info!("League has no rosters; skipping standings and rosters snapshots");
        return Ok(());
    }
    write_json_file(&layout.standings(season), &standings(season, league)).await?;
    write_json_file(
        &layout.rosters_min(season),
        &minimal_rosters(season, league, directory),
    )
    .await
}
