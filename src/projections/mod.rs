//! Weekly player projections, normalised to one points figure per player.
//!
//! Two sources feed the same `projections.json`: Sleeper's projections
//! endpoint and the FantasyPros per-position CSV downloads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::error::AppError;
use crate::site::{SiteLayout, write_json_file};

pub mod fantasypros;
pub mod sleeper;

pub use fantasypros::{FantasyProsClient, PlayerIndex, fetch_fantasypros_projections};
pub use sleeper::{fetch_projections, normalize_projection};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub player_id: String,
    pub position: String,
    pub points: f64,
}

/// Contents of `projections.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekProjections {
    pub season: u32,
    pub week: u32,
    pub projections: Vec<Projection>,
}

/// Writes `projections.json` for the season and week held in `projections`.
pub async fn write_week_projections(
    layout: &SiteLayout,
    projections: &WeekProjections,
) -> Result<PathBuf, AppError> {
    let path = layout.projections(projections.season, projections.week);
    write_json_file(&path, projections).await?;
    info!("{} projections written", projections.projections.len());
    Ok(path)
}
