//! Weekly head-to-head pairings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::LeagueTarget;
use crate::sleeper::League;
use crate::sleeper::league::fallback_team_name;
use crate::sleeper::models::SleeperMatchup;

/// Two roster ids facing each other. Home/away is the order Sleeper listed them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchupPair {
    pub home_roster_id: u32,
    pub away_roster_id: u32,
}

impl MatchupPair {
    pub fn involves(&self, roster_id: u32) -> bool {
        self.home_roster_id == roster_id || self.away_roster_id == roster_id
    }

    /// True when both pairs name the same two rosters, in either order.
    pub fn same_teams(&self, other: &MatchupPair) -> bool {
        (self.home_roster_id == other.home_roster_id && self.away_roster_id == other.away_roster_id)
            || (self.home_roster_id == other.away_roster_id
                && self.away_roster_id == other.home_roster_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchupEntry {
    pub home_roster_id: u32,
    pub away_roster_id: u32,
    pub home_team_name: String,
    pub away_team_name: String,
}

/// Contents of `matchups.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekMatchups {
    pub league_id: String,
    pub season: u32,
    pub week: u32,
    pub matchups: Vec<MatchupEntry>,
}

/// Pairs the week's matchup entries.
///
/// Entries are grouped by `matchup_id` in first-seen order and the first two
/// rosters of each group form a pair; entries without a `matchup_id` (byes,
/// offseason) are ignored. When that yields nothing, `roster_ids` are sorted
/// and paired sequentially, leaving an odd one out unpaired.
pub fn pair_matchups(entries: &[SleeperMatchup], roster_ids: &[u32]) -> Vec<MatchupPair> {
    let mut group_order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, Vec<u32>> = HashMap::new();
    for entry in entries {
        let Some(matchup_id) = entry.matchup_id else {
            continue;
        };
        groups
            .entry(matchup_id)
            .or_insert_with(|| {
                group_order.push(matchup_id);
                Vec::new()
            })
            .push(entry.roster_id);
    }

    let pairs: Vec<MatchupPair> = group_order
        .iter()
        .filter_map(|id| match groups.get(id).map(Vec::as_slice) {
            Some([home, away, ..]) => Some(MatchupPair {
                home_roster_id: *home,
                away_roster_id: *away,
            }),
            _ => None,
        })
        .collect();

    if !pairs.is_empty() {
        return pairs;
    }

    let mut sorted = roster_ids.to_vec();
    sorted.sort_unstable();
    sorted
        .chunks_exact(2)
        .map(|chunk| MatchupPair {
            home_roster_id: chunk[0],
            away_roster_id: chunk[1],
        })
        .collect()
}

/// Builds `matchups.json` for the target week.
pub fn build_week_matchups(
    target: &LeagueTarget,
    league: &League,
    entries: &[SleeperMatchup],
) -> WeekMatchups {
    let names = league.team_names_by_roster();
    let name_of = |roster_id: u32| {
        names
            .get(&roster_id)
            .cloned()
            .unwrap_or_else(|| fallback_team_name(roster_id))
    };

    let matchups = pair_matchups(entries, &league.sorted_roster_ids())
        .into_iter()
        .map(|pair| MatchupEntry {
            home_roster_id: pair.home_roster_id,
            away_roster_id: pair.away_roster_id,
            home_team_name: name_of(pair.home_roster_id),
            away_team_name: name_of(pair.away_roster_id),
        })
        .collect();

    WeekMatchups {
        league_id: target.league_id.clone(),
        season: target.season,
        week: target.week,
        matchups,
    }
}
