//! Static-site data files: teams, weekly matchups and rankings, season
//! snapshots and the rank history.

pub mod builder;
pub mod files;
pub mod history;
pub mod matchups;
pub mod rankings;
pub mod snapshots;

pub use builder::{SiteFiles, build_site_data};
pub use files::{SiteLayout, read_json_file, write_file_atomic, write_json_file};
pub use history::{History, HistoryEntry, update_history};
pub use matchups::{MatchupEntry, MatchupPair, WeekMatchups, pair_matchups};
pub use rankings::{Analysis, KeyPlayer, RankingEntry, Source, WeekRankings, baseline_rankings};

/// The league week a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueTarget {
    pub league_id: String,
    pub season: u32,
    pub week: u32,
}

impl LeagueTarget {
    pub fn new(league_id: impl Into<String>, season: u32, week: u32) -> Self {
        Self {
            league_id: league_id.into(),
            season,
            week,
        }
    }
}

impl std::fmt::Display for LeagueTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "league {} season {} week {}", self.league_id, self.season, self.week)
    }
}
