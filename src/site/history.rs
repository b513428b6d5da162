//! Season rank history.
//!
//! `history.json` maps week numbers to that week's ordered ranks. Updating a
//! week replaces its whole entry; every other week is left as it was.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::files::{SiteLayout, read_json_file, write_json_file};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub roster_id: u32,
    #[serde(default)]
    pub team_name: String,
    pub rank: u32,
}

/// Contents of `history.json`. Weeks serialise in numeric order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct History {
    pub season: u32,
    #[serde(default)]
    pub weeks: BTreeMap<u32, Vec<HistoryEntry>>,
}

impl History {
    pub fn empty(season: u32) -> Self {
        Self {
            season,
            weeks: BTreeMap::new(),
        }
    }

    /// Loads the history file, or an empty history when it does not exist.
    /// A file that exists but cannot be parsed is an error.
    pub async fn load_or_empty(path: &Path, season: u32) -> Result<Self, AppError> {
        if !path.exists() {
            info!("No history at {}, starting a new one", path.display());
            return Ok(Self::empty(season));
        }
        read_json_file(path).await
    }

    /// Replaces the week's entry wholesale.
    pub fn replace_week(&mut self, week: u32, entries: Vec<HistoryEntry>) {
        if self.weeks.insert(week, entries).is_some() {
            info!("Replaced history for week {week}");
        }
    }
}

/// The slice of `power_rankings.json` the history needs.
#[derive(Debug, Deserialize)]
pub struct WeekSnapshot {
    pub league_id: String,
    pub rankings: Vec<HistoryEntry>,
}

/// Copies the week's ranks from `power_rankings.json` into the season
/// history and returns the snapshot that was applied.
#[instrument(skip(layout))]
pub async fn update_history(
    layout: &SiteLayout,
    season: u32,
    week: u32,
) -> Result<WeekSnapshot, AppError> {
    let week_path = layout.power_rankings(season, week);
    if !week_path.exists() {
        return Err(AppError::week_file_not_found(week_path.display().to_string()));
    }
    let snapshot: WeekSnapshot = read_json_file(&week_path).await?;
    if snapshot.rankings.is_empty() {
        warn!("Week {week} has no rankings; recording an empty week");
    }

    let history_path = layout.history(season);
    let mut history = History::load_or_empty(&history_path, season).await?;
    history.season = season;
    history.replace_week(week, snapshot.rankings.clone());
    write_json_file(&history_path, &history).await?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn entry(roster_id: u32, rank: u32) -> HistoryEntry {
        HistoryEntry {
            roster_id,
            team_name: format!("Team {roster_id}"),
            rank,
        }
    }

    #[test]
    fn test_weeks_serialize_in_numeric_order() {
        let mut history = History::empty(2025);
        history.replace_week(10, vec![entry(1, 1)]);
        history.replace_week(2, vec![entry(1, 2)]);
        history.replace_week(9, vec![entry(1, 3)]);

        let json = serde_json::to_string(&history).unwrap();
        let two = json.find("\"2\"").unwrap();
        let nine = json.find("\"9\"").unwrap();
        let ten = json.find("\"10\"").unwrap();
        assert!(two < nine && nine < ten);

        let parsed: History = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn test_replace_week_is_whole_entry() {
        let mut history = History::empty(2025);
        history.replace_week(1, vec![entry(1, 1), entry(2, 2), entry(3, 3)]);
        history.replace_week(1, vec![entry(2, 1)]);
        assert_eq!(history.weeks[&1], vec![entry(2, 1)]);
    }

    #[tokio::test]
    async fn test_missing_week_file() {
        let temp_dir = tempdir().unwrap();
        let layout = SiteLayout::new(temp_dir.path());
        let result = update_history(&layout, 2025, 4).await;
        assert!(matches!(result, Err(AppError::WeekFileNotFound { .. })));
        assert!(!layout.history(2025).exists());
    }

    #[tokio::test]
    async fn test_corrupt_history_is_not_reset() {
        let temp_dir = tempdir().unwrap();
        let layout = SiteLayout::new(temp_dir.path());
        write_json_file(
            &layout.power_rankings(2025, 1),
            &json!({"league_id": "L1", "season": 2025, "week": 1,
                    "rankings": [{"roster_id": 1, "team_name": "A", "rank": 1}]}),
        )
        .await
        .unwrap();
        std::fs::write(layout.history(2025), "{not json").unwrap();

        let result = update_history(&layout, 2025, 1).await;
        assert!(matches!(result, Err(AppError::Json(_))));
        assert_eq!(std::fs::read_to_string(layout.history(2025)).unwrap(), "{not json");
    }
}
