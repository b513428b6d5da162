use serde::{Deserialize, Serialize};

use crate::constants::{SLEEPER_AVATAR_CDN, UNKNOWN_TEAM_NAME};

/// A league member as returned by `/league/{id}/users`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl SleeperUser {
    /// Team name shown on the site: the custom team name, then the display
    /// name, then the username.
    pub fn team_name(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| non_empty(&m.team_name))
            .or_else(|| non_empty(&self.display_name))
            .or_else(|| non_empty(&self.username))
            .unwrap_or(UNKNOWN_TEAM_NAME)
            .to_string()
    }

    pub fn display_name_or_empty(&self) -> String {
        self.display_name.clone().unwrap_or_default()
    }

    /// Full CDN URL of the avatar, or an empty string when the user has none.
    pub fn avatar_url(&self) -> String {
        match non_empty(&self.avatar) {
            Some(avatar) => format!("{SLEEPER_AVATAR_CDN}/{avatar}"),
            None => String::new(),
        }
    }
}
