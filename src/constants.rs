//! Application-wide constants and configuration values
//!
//! Endpoints, defaults and prompt limits live here so commands and tests
//! agree on them.

/// Base URL of the Sleeper read-only API
pub const SLEEPER_API_BASE: &str = "https://api.sleeper.app/v1";

/// Base URL of the LLM completion API
pub const LLM_API_BASE: &str = "https://api.openai.com/v1";

/// Base URL of the FantasyPros weekly projections pages
pub const FANTASYPROS_BASE: &str = "https://www.fantasypros.com/nfl/projections";

/// CDN prefix for user avatars
pub const SLEEPER_AVATAR_CDN: &str = "https://sleepercdn.com/avatars";

/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Default site root; data files go under `<docs_dir>/data`
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Default directory for CSV exports
pub const DEFAULT_CSV_OUT_DIR: &str = "data";

/// Team name used when a user has no team name, display name or username
pub const UNKNOWN_TEAM_NAME: &str = "Unknown Team";

/// Name used for directory entries without any name fields
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown Player";

/// Positions requested from the projections endpoint, in output order
pub const PROJECTION_POSITIONS: [&str; 6] = ["QB", "RB", "WR", "TE", "K", "DEF"];

/// Positions requested from FantasyPros, in output order
pub const FANTASYPROS_POSITIONS: [&str; 6] = ["QB", "RB", "WR", "TE", "K", "DST"];

/// FantasyPros scoring format used when `--scoring` is not given
pub const DEFAULT_FANTASYPROS_SCORING: &str = "PPR";

/// Season type used when neither the CLI nor the NFL state provides one
pub const DEFAULT_SEASON_TYPE: &str = "regular";

/// Environment variable names
pub mod env_vars {
    /// API key for the LLM provider
    pub const LLM_API_KEY: &str = "OPENAI_API_KEY";

    /// Override for the Sleeper API base URL
    pub const API_BASE: &str = "SLEEPER_SITE_API_BASE";

    /// Override for the LLM API base URL
    pub const LLM_API_BASE: &str = "SLEEPER_SITE_LLM_API_BASE";

    /// Override for the FantasyPros projections base URL
    pub const FANTASYPROS_BASE: &str = "SLEEPER_SITE_FANTASYPROS_BASE";

    /// Override for the default league id
    pub const LEAGUE_ID: &str = "SLEEPER_SITE_LEAGUE_ID";

    /// Override for the log file path
    pub const LOG_FILE: &str = "SLEEPER_SITE_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "SLEEPER_SITE_HTTP_TIMEOUT";
}

/// Limits applied when summarising rosters for prompts
pub mod prompt_limits {
    /// Starters listed per roster in the matchup prompt
    pub const STARTERS_PER_ROSTER: usize = 10;

    /// Bench players listed per roster in the matchup prompt
    pub const BENCH_PER_ROSTER: usize = 6;

    /// Rosters included in the matchup prompt
    pub const MAX_ROSTERS: usize = 24;
}

/// Sampling temperatures for chat completions
pub mod temperature {
    pub const POWER_RANKINGS: f64 = 0.7;
    pub const MATCHUP_PREDICTIONS: f64 = 0.9;
}
