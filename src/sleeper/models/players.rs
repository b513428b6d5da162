use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_PLAYER_NAME;

/// One entry of the `/players/nfl` directory. Only the fields the site uses
/// are kept; the rest of the (large) record is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PlayerEntry {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerEntry {
    /// Full name if present, otherwise first and last name joined. Team
    /// defenses only carry first/last ("Dallas" "Cowboys").
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.is_empty()) {
            return full.to_string();
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            UNKNOWN_PLAYER_NAME.to_string()
        } else {
            joined
        }
    }

    pub fn position_or_empty(&self) -> String {
        self.position.clone().unwrap_or_default()
    }

    pub fn team_or_empty(&self) -> String {
        self.team.clone().unwrap_or_default()
    }
}
