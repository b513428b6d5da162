#![allow(dead_code)]

use reqwest::Client;
use serde_json::{Value, json};
use sleeper_site::http::create_http_client_with_timeout;
use sleeper_site::sleeper::SleeperClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LEAGUE_ID: &str = "L100";

pub fn http() -> Client {
    create_http_client_with_timeout(5).unwrap()
}

pub fn sleeper_client(server: &MockServer) -> SleeperClient {
    SleeperClient::new(http(), server.uri())
}

pub fn users() -> Value {
    json!([
        {"user_id": "u1", "display_name": "alpha", "avatar": "a1",
         "metadata": {"team_name": "Alpha Dogs"}},
        {"user_id": "u2", "display_name": "bravo", "avatar": null, "metadata": {}},
        {"user_id": "u3", "display_name": "coowner", "avatar": null}
    ])
}

pub fn rosters() -> Value {
    json!([
        {"roster_id": 1, "owner_id": "u1", "players": ["4046", "6794"], "starters": ["4046"],
         "settings": {"wins": 1, "losses": 0, "ties": 0, "fpts": 120, "fpts_decimal": 50}},
        {"roster_id": 2, "owner_id": "u2", "players": ["2133", "9999"], "starters": ["2133"],
         "settings": {"wins": 0, "losses": 1, "ties": 0, "fpts": 98, "fpts_decimal": 0}}
    ])
}

pub fn players() -> Value {
    json!({
        "4046": {"full_name": "Patrick Mahomes", "position": "QB", "team": "KC"},
        "6794": {"full_name": "Justin Jefferson", "position": "WR", "team": "MIN"},
        "2133": {"first_name": "Davante", "last_name": "Adams", "position": "WR", "team": "LV"}
    })
}

pub fn matchups() -> Value {
    json!([
        {"roster_id": 2, "matchup_id": 1, "points": 0},
        {"roster_id": 1, "matchup_id": 1, "points": 0}
    ])
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts users, rosters and week 1-2 matchups for `LEAGUE_ID`, plus the
/// player directory, which may be requested at most once.
pub async fn mount_league(server: &MockServer) {
    mount_json(server, &format!("/league/{LEAGUE_ID}/users"), users()).await;
    mount_json(server, &format!("/league/{LEAGUE_ID}/rosters"), rosters()).await;
    mount_json(server, &format!("/league/{LEAGUE_ID}/matchups/1"), matchups()).await;
    mount_json(server, &format!("/league/{LEAGUE_ID}/matchups/2"), json!(null)).await;

    Mock::given(method("GET"))
        .and(path("/players/nfl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(players()))
        .up_to_n_times(1)
        .expect(0..=1)
        .mount(server)
        .await;
}
