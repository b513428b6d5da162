use serde::{Deserialize, Serialize};

/// One roster's side of a weekly matchup, from `/league/{id}/matchups/{week}`.
/// Both sides of a game share the same `matchup_id`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SleeperMatchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_deserialization() {
        let json = r#"[
            {"roster_id": 1, "matchup_id": 2, "points": 101.5, "starters": ["4046"]},
            {"roster_id": 4, "matchup_id": null, "points": 0}
        ]"#;
        let entries: Vec<SleeperMatchup> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].matchup_id, Some(2));
        assert_eq!(entries[0].points, Some(101.5));
        assert_eq!(entries[1].matchup_id, None);
    }
}
