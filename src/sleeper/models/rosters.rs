use serde::{Deserialize, Serialize};

/// A team's roster as returned by `/league/{id}/rosters`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SleeperRoster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub settings: Option<RosterSettings>,
}

/// Season record. Sleeper splits points into an integer part and hundredths.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: i64,
    #[serde(default)]
    pub fpts_decimal: i64,
    #[serde(default)]
    pub fpts_against: i64,
    #[serde(default)]
    pub fpts_against_decimal: i64,
}

impl RosterSettings {
    pub fn points_for(&self) -> f64 {
        self.fpts as f64 + self.fpts_decimal as f64 / 100.0
    }

    pub fn points_against(&self) -> f64 {
        self.fpts_against as f64 + self.fpts_against_decimal as f64 / 100.0
    }
}

impl SleeperRoster {
    /// Owner id, or an empty string for an orphaned roster.
    pub fn owner_id_or_empty(&self) -> &str {
        self.owner_id.as_deref().unwrap_or("")
    }

    pub fn player_ids(&self) -> &[String] {
        self.players.as_deref().unwrap_or(&[])
    }

    pub fn starter_ids(&self) -> &[String] {
        self.starters.as_deref().unwrap_or(&[])
    }

    pub fn is_starter(&self, player_id: &str) -> bool {
        self.starter_ids().iter().any(|id| id == player_id)
    }

    /// Rostered players that are not in the starting lineup, in roster order.
    pub fn bench_ids(&self) -> Vec<&String> {
        self.player_ids()
            .iter()
            .filter(|id| !self.is_starter(id))
            .collect()
    }

    pub fn record(&self) -> RosterSettings {
        self.settings.clone().unwrap_or_default()
    }
}
