use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Sleeper fantasy football site generator
///
/// Fetches league data from the Sleeper API and writes the JSON and CSV
/// files behind a static league site. Power rankings and matchup
/// predictions are written by an LLM when an API key is available.
///
/// Season and week default to the current NFL state reported by Sleeper.
#[derive(Parser, Debug)]
#[command(name = "sleeper_site", version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Cli {
    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export rosters and teams of a league to CSV files
    ExportCsv {
        /// Sleeper league id (defaults to the configured league)
        #[arg(long = "league-id")]
        league_id: Option<String>,

        /// Directory the CSV files are written to
        #[arg(long = "out-dir", default_value = crate::constants::DEFAULT_CSV_OUT_DIR)]
        out_dir: String,
    },

    /// Write teams, matchups, baseline rankings and season snapshots, then update the history
    BuildSite(WeekArgs),

    /// Copy a week's power rankings into the season history and refresh season snapshots
    UpdateHistory(SeasonWeekArgs),

    /// Generate the week's power rankings with an LLM
    PowerRankings {
        #[command(flatten)]
        week: WeekArgs,
        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Generate the week's matchup predictions with an LLM
    PredictMatchups {
        #[command(flatten)]
        week: WeekArgs,
        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Fetch weekly player projections
    Projections {
        #[command(flatten)]
        target: SeasonWeekArgs,

        /// Where the projections come from
        #[arg(long, value_enum, default_value_t = ProjectionSource::Sleeper)]
        source: ProjectionSource,

        /// Season type passed to Sleeper (defaults to the current NFL state)
        #[arg(long = "season-type")]
        season_type: Option<String>,

        /// FantasyPros scoring format (PPR, HALF, STD)
        #[arg(long, default_value = crate::constants::DEFAULT_FANTASYPROS_SCORING)]
        scoring: String,
    },

    /// Show or update the configuration file
    Config(ConfigArgs),
}

/// Provider of weekly projections.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionSource {
    /// Sleeper's projections endpoint
    Sleeper,
    /// FantasyPros CSV downloads matched to Sleeper players by name
    #[value(name = "fantasypros")]
    FantasyPros,
}

/// Season, week and output location.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct SeasonWeekArgs {
    /// Season year (defaults to the current NFL season)
    #[arg(long)]
    pub season: Option<u32>,

    /// Week number (defaults to the current NFL week)
    #[arg(long)]
    pub week: Option<u32>,

    /// Site root; data goes to <docs-dir>/data (defaults to the configured directory)
    #[arg(long = "docs-dir")]
    pub docs_dir: Option<String>,
}

/// A league week and output location.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct WeekArgs {
    /// Sleeper league id (defaults to the configured league)
    #[arg(long = "league-id")]
    pub league_id: Option<String>,

    #[command(flatten)]
    pub target: SeasonWeekArgs,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LlmArgs {
    /// Completion model (defaults to the configured model)
    #[arg(long)]
    pub model: Option<String>,

    /// Let the model search the web while writing
    #[arg(long = "enable-web")]
    pub enable_web: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigArgs {
    /// List current configuration settings
    #[arg(long = "list", short = 'l')]
    pub list: bool,

    /// Set the default league id
    #[arg(long = "set-league-id")]
    pub league_id: Option<String>,

    /// Set the default site root
    #[arg(long = "set-docs-dir")]
    pub docs_dir: Option<String>,

    /// Set a persistent custom log file location
    #[arg(long = "set-log-file")]
    pub log_file_path: Option<String>,

    /// Clear the custom log file path, reverting to the default log location
    #[arg(long = "clear-log-file", conflicts_with = "log_file_path")]
    pub clear_log_file_path: bool,
}

impl ConfigArgs {
    pub fn has_updates(&self) -> bool {
        self.league_id.is_some()
            || self.docs_dir.is_some()
            || self.log_file_path.is_some()
            || self.clear_log_file_path
    }
}
