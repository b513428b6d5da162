//! Joined view over a league's users and rosters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sleeper::models::{SleeperRoster, SleeperUser};

/// A team as published in `teams.json`: one roster plus its owner's metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub roster_id: u32,
    pub owner_user_id: String,
    pub owner_display_name: String,
    pub team_name: String,
    pub avatar_url: String,
}

/// Users and rosters of one league, in the order the API returned them.
#[derive(Debug, Clone, Default)]
pub struct League {
    pub league_id: String,
    pub users: Vec<SleeperUser>,
    pub rosters: Vec<SleeperRoster>,
}

impl League {
    pub fn new(
        league_id: impl Into<String>,
        users: Vec<SleeperUser>,
        rosters: Vec<SleeperRoster>,
    ) -> Self {
        Self {
            league_id: league_id.into(),
            users,
            rosters,
        }
    }

    /// Owner user id → roster id, skipping orphaned rosters.
    pub fn owner_to_roster(&self) -> HashMap<&str, u32> {
        self.rosters
            .iter()
            .filter(|r| !r.owner_id_or_empty().is_empty())
            .map(|r| (r.owner_id_or_empty(), r.roster_id))
            .collect()
    }

    pub fn owner_of(&self, roster: &SleeperRoster) -> Option<&SleeperUser> {
        let owner_id = roster.owner_id_or_empty();
        if owner_id.is_empty() {
            return None;
        }
        self.users.iter().find(|u| u.user_id == owner_id)
    }

    pub fn roster(&self, roster_id: u32) -> Option<&SleeperRoster> {
        self.rosters.iter().find(|r| r.roster_id == roster_id)
    }

    /// Teams in user order. Users without a roster (co-owners, departed
    /// members) are left out.
    pub fn teams(&self) -> Vec<Team> {
        let owner_to_roster = self.owner_to_roster();
        self.users
            .iter()
            .filter_map(|user| {
                let roster_id = *owner_to_roster.get(user.user_id.as_str())?;
                Some(Team {
                    roster_id,
                    owner_user_id: user.user_id.clone(),
                    owner_display_name: user.display_name_or_empty(),
                    team_name: user.team_name(),
                    avatar_url: user.avatar_url(),
                })
            })
            .collect()
    }

    /// Display name for every roster; orphaned rosters become `Team <id>`.
    pub fn team_names_by_roster(&self) -> HashMap<u32, String> {
        self.rosters
            .iter()
            .map(|roster| {
                let name = self
                    .owner_of(roster)
                    .map(SleeperUser::team_name)
                    .unwrap_or_else(|| fallback_team_name(roster.roster_id));
                (roster.roster_id, name)
            })
            .collect()
    }

    pub fn sorted_roster_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.rosters.iter().map(|r| r.roster_id).collect();
        ids.sort_unstable();
        ids
    }
}

pub fn fallback_team_name(roster_id: u32) -> String {
    format!("Team {roster_id}")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::sleeper::models::{RosterSettings, UserMetadata};

    pub fn user(user_id: &str, display_name: &str, team_name: Option<&str>) -> SleeperUser {
        SleeperUser {
            user_id: user_id.to_string(),
            display_name: Some(display_name.to_string()),
            username: None,
            avatar: Some(format!("av-{user_id}")),
            metadata: team_name.map(|t| UserMetadata {
                team_name: Some(t.to_string()),
            }),
        }
    }

    pub fn roster(
        roster_id: u32,
        owner_id: Option<&str>,
        players: &[&str],
        starters: &[&str],
        record: (u32, u32, i64),
    ) -> SleeperRoster {
        SleeperRoster {
            roster_id,
            owner_id: owner_id.map(str::to_string),
            players: Some(players.iter().map(|p| p.to_string()).collect()),
            starters: Some(starters.iter().map(|p| p.to_string()).collect()),
            settings: Some(RosterSettings {
                wins: record.0,
                losses: record.1,
                fpts: record.2,
                ..RosterSettings::default()
            }),
        }
    }

    /// Four-team league with one co-owner (no roster) and one orphaned roster.
    pub fn sample_league() -> League {
        League::new(
            "L1",
            vec![
                user("u1", "alpha", Some("Alpha Dogs")),
                user("u2", "bravo", None),
                user("u3", "charlie", Some("Charlie Hustle")),
                user("u9", "coowner", Some("Shared Squad")),
            ],
            vec![
                roster(1, Some("u1"), &["p1", "p2"], &["p1"], (1, 1, 210)),
                roster(2, Some("u2"), &["p3", "p4"], &["p3"], (2, 0, 190)),
                roster(3, Some("u3"), &["p5"], &["p5"], (1, 1, 250)),
                roster(4, None, &[], &[], (0, 2, 150)),
            ],
        )
    }
}
