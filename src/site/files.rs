//! Layout of the generated data tree and JSON file helpers.
//!
//! ```text
//! <docs>/data/teams.json
//! <docs>/data/<season>/history.json
//! <docs>/data/<season>/standings.json
//! <docs>/data/<season>/rosters_min.json
//! <docs>/data/<season>/week<week>/{matchups,power_rankings,matchup_predictions,projections}.json
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::AppError;

/// Resolves every data file path under `<docs_dir>/data`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayout {
    data_dir: PathBuf,
}

impl SiteLayout {
    pub fn new(docs_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: docs_dir.as_ref().join("data"),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn teams(&self) -> PathBuf {
        self.data_dir.join("teams.json")
    }

    pub fn season_dir(&self, season: u32) -> PathBuf {
        self.data_dir.join(season.to_string())
    }

    pub fn week_dir(&self, season: u32, week: u32) -> PathBuf {
        self.season_dir(season).join(format!("week{week}"))
    }

    pub fn matchups(&self, season: u32, week: u32) -> PathBuf {
        self.week_dir(season, week).join("matchups.json")
    }

    pub fn power_rankings(&self, season: u32, week: u32) -> PathBuf {
        self.week_dir(season, week).join("power_rankings.json")
    }

    pub fn matchup_predictions(&self, season: u32, week: u32) -> PathBuf {
        self.week_dir(season, week).join("matchup_predictions.json")
    }

    pub fn projections(&self, season: u32, week: u32) -> PathBuf {
        self.week_dir(season, week).join("projections.json")
    }

    pub fn history(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("history.json")
    }

    pub fn standings(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("standings.json")
    }

    pub fn rosters_min(&self, season: u32) -> PathBuf {
        self.season_dir(season).join("rosters_min.json")
    }
}

/// Renders `value` as pretty-printed JSON with a trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// The content is written to a sibling `.tmp` file and renamed over the
/// target, so an interrupted run never leaves a half-written file behind.
pub async fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, contents).await?;
    fs::rename(&tmp_path, path).await?;

    info!("Wrote: {}", path.display());
    Ok(())
}

/// Writes `value` as pretty JSON through [`write_file_atomic`].
pub async fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = to_pretty_json(value)?;
    write_file_atomic(path, json.as_bytes()).await
}

/// Reads and parses a JSON file. A missing file surfaces as `AppError::Io`.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    debug!("Reading {}", path.display());
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
