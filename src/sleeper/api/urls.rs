//! URL building utilities for Sleeper endpoints

/// Builds the URL listing a league's users.
///
/// # Example
/// ```
/// use sleeper_site::sleeper::api::build_users_url;
///
/// let url = build_users_url("https://api.sleeper.app/v1", "1248075580834856960");
/// assert_eq!(url, "https://api.sleeper.app/v1/league/1248075580834856960/users");
/// ```
pub fn build_users_url(api_base: &str, league_id: &str) -> String {
    format!("{api_base}/league/{league_id}/users")
}

/// Builds the URL listing a league's rosters.
///
/// # Example
/// ```
/// use sleeper_site::sleeper::api::build_rosters_url;
///
/// let url = build_rosters_url("https://api.sleeper.app/v1", "42");
/// assert_eq!(url, "https://api.sleeper.app/v1/league/42/rosters");
/// ```
pub fn build_rosters_url(api_base: &str, league_id: &str) -> String {
    format!("{api_base}/league/{league_id}/rosters")
}

/// Builds the URL of a league's matchups for one scoring week.
///
/// # Example
/// ```
/// use sleeper_site::sleeper::api::build_matchups_url;
///
/// let url = build_matchups_url("https://api.sleeper.app/v1", "42", 3);
/// assert_eq!(url, "https://api.sleeper.app/v1/league/42/matchups/3");
/// ```
pub fn build_matchups_url(api_base: &str, league_id: &str, week: u32) -> String {
    format!("{api_base}/league/{league_id}/matchups/{week}")
}

/// Builds the URL of the global NFL player directory.
pub fn build_players_url(api_base: &str) -> String {
    format!("{api_base}/players/nfl")
}

/// Builds the URL of the current NFL state (season, week, season type).
pub fn build_state_url(api_base: &str) -> String {
    format!("{api_base}/state/nfl")
}

/// Builds the projections URL for a season and week. Empty `position` or
/// `season_type` values are left out of the query string.
///
/// # Example
/// ```
/// use sleeper_site::sleeper::api::build_projections_url;
///
/// let url = build_projections_url("https://api.sleeper.app/v1", 2025, 4, Some("WR"), "regular");
/// assert_eq!(url, "https://api.sleeper.app/v1/projections/nfl/2025/4?position=WR&season_type=regular");
///
/// let bare = build_projections_url("https://api.sleeper.app/v1", 2025, 4, None, "");
/// assert_eq!(bare, "https://api.sleeper.app/v1/projections/nfl/2025/4");
/// ```
pub fn build_projections_url(
    api_base: &str,
    season: u32,
    week: u32,
    position: Option<&str>,
    season_type: &str,
) -> String {
    let mut query = Vec::new();
    if let Some(position) = position.filter(|p| !p.is_empty()) {
        query.push(format!("position={position}"));
    }
    if !season_type.is_empty() {
        query.push(format!("season_type={season_type}"));
    }

    let base = format!("{api_base}/projections/nfl/{season}/{week}");
    if query.is_empty() {
        base
    } else {
        format!("{base}?{}", query.join("&"))
    }
}
