use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw projection row from `/projections/nfl/{season}/{week}`.
///
/// The endpoint is loosely shaped: points may sit under `stats` or at the
/// root, and the player id may be a string or a number, so values are kept
/// as JSON until normalised.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RawProjection {
    #[serde(default)]
    pub player_id: Option<Value>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub stats: Option<Map<String, Value>>,
    #[serde(default)]
    pub player: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
