//! Sleeper fantasy football site generator library
//!
//! Fetches league data from the Sleeper read-only API and writes the JSON and
//! CSV files behind a static league site, optionally with LLM-written power
//! rankings and matchup predictions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sleeper_site::error::AppError;
//! use sleeper_site::http::create_http_client_with_timeout;
//! use sleeper_site::site::{LeagueTarget, SiteLayout, build_site_data};
//! use sleeper_site::sleeper::{PlayerDirectoryCache, SleeperClient};
//! use sleeper_site::Config;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
//!     let client = SleeperClient::from_config(&config, http);
//!     let mut players = PlayerDirectoryCache::new();
//!
//!     let target = LeagueTarget::new("1248075580834856960", 2025, 1);
//!     let layout = SiteLayout::new("docs");
//!     build_site_data(&client, &mut players, &target, &layout).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod http;
pub mod logging;
pub mod narrative;
pub mod projections;
pub mod site;
pub mod sleeper;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use site::{LeagueTarget, SiteLayout};
pub use sleeper::{PlayerDirectoryCache, SleeperClient};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
