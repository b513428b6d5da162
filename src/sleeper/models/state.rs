use serde::{Deserialize, Serialize};

/// Current NFL calendar position from `/state/nfl`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct NflState {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub season_type: Option<String>,
    #[serde(default)]
    pub display_week: Option<u32>,
}

impl NflState {
    pub fn season_year(&self) -> Option<u32> {
        self.season.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Current scoring week. Sleeper reports week 0 in the offseason, which
    /// maps to week 1.
    pub fn current_week(&self) -> u32 {
        self.week.unwrap_or(1).max(1)
    }

    pub fn season_type_or_default(&self) -> String {
        self.season_type
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| crate::constants::DEFAULT_SEASON_TYPE.to_string())
    }
}
