//! Sleeper's projections endpoint.

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::{Projection, WeekProjections};
use crate::constants::PROJECTION_POSITIONS;
use crate::error::AppError;
use crate::sleeper::SleeperClient;
use crate::sleeper::models::RawProjection;

/// Scoring keys in order of preference.
const POINTS_KEYS: [&str; 3] = ["pts_ppr", "pts_half_ppr", "pts_std"];

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(map: Option<&Map<String, Value>>, key: &str) -> Option<f64> {
    map.and_then(|m| m.get(key)).and_then(Value::as_f64)
}

/// Normalises one raw row. Rows without a player id are dropped.
///
/// Points are the first present of PPR, half-PPR and standard (each looked
/// up under `stats` first, then at the root), then `fantasy_points`, else 0.
pub fn normalize_projection(raw: &RawProjection) -> Option<Projection> {
    let player_object = raw.player.as_ref().and_then(Value::as_object);

    let player_id = raw
        .player_id
        .as_ref()
        .and_then(id_string)
        .or_else(|| raw.player.as_ref().and_then(id_string))
        .or_else(|| player_object.and_then(|p| p.get("player_id")).and_then(id_string))
        .filter(|id| !id.is_empty())?;

    let points = POINTS_KEYS
        .iter()
        .find_map(|key| number(raw.stats.as_ref(), key).or_else(|| number(Some(&raw.extra), key)))
        .or_else(|| number(Some(&raw.extra), "fantasy_points"))
        .unwrap_or(0.0);

    let position = raw
        .position
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| {
            player_object
                .and_then(|p| p.get("position"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();

    Some(Projection {
        player_id,
        position,
        points,
    })
}

/// Fetches projections for every position. A position whose request fails
/// is logged and skipped.
#[instrument(skip(client))]
pub async fn fetch_projections(
    client: &SleeperClient,
    season: u32,
    week: u32,
    season_type: &str,
) -> Result<WeekProjections, AppError> {
    let mut projections = Vec::new();
    for position in PROJECTION_POSITIONS {
        match client
            .projections(season, week, Some(position), season_type)
            .await
        {
            Ok(rows) => {
                let before = projections.len();
                projections.extend(rows.iter().filter_map(normalize_projection));
                info!("{position}: {} projections", projections.len() - before);
            }
            Err(e) => warn!("Skipping {position} projections: {e}"),
        }
    }

    Ok(WeekProjections {
        season,
        week,
        projections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawProjection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_points_preference_order() {
        let p = normalize_projection(&raw(json!({
            "player_id": "4046", "position": "QB",
            "stats": {"pts_half_ppr": 20.5, "pts_std": 19.0}, "pts_ppr": 22.25
        })))
        .unwrap();
        // PPR at the root beats half-PPR under stats.
        assert_eq!(p.points, 22.25);

        let p = normalize_projection(&raw(json!({
            "player_id": "4046", "stats": {"pts_std": 12.0}
        })))
        .unwrap();
        assert_eq!(p.points, 12.0);

        let p = normalize_projection(&raw(json!({"player_id": "4046", "fantasy_points": 3})))
            .unwrap();
        assert_eq!(p.points, 3.0);

        let p = normalize_projection(&raw(json!({"player_id": "4046"}))).unwrap();
        assert_eq!(p.points, 0.0);
    }

    #[test]
    fn test_player_id_and_position_fallbacks() {
        let p = normalize_projection(&raw(json!({
            "player_id": 6794,
            "player": {"position": "WR", "first_name": "Justin"}
        })))
        .unwrap();
        assert_eq!(p.player_id, "6794");
        assert_eq!(p.position, "WR");

        let p = normalize_projection(&raw(json!({"player": "DAL", "position": "DEF"}))).unwrap();
        assert_eq!(p.player_id, "DAL");

        assert!(normalize_projection(&raw(json!({"player_id": "", "stats": {}}))).is_none());
        assert!(normalize_projection(&raw(json!({"stats": {"pts_ppr": 1.0}}))).is_none());
    }
}
