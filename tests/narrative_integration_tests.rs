mod common;

use common::{LEAGUE_ID, http, mount_league, sleeper_client};
use serde_json::{Value, json};
use sleeper_site::error::AppError;
use sleeper_site::narrative::{
    LlmClient, NarrativeOptions, generate_matchup_predictions, generate_power_rankings,
};
use sleeper_site::site::{LeagueTarget, SiteLayout};
use sleeper_site::sleeper::PlayerDirectoryCache;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> NarrativeOptions {
    NarrativeOptions {
        model: "test-model".to_string(),
        enable_web: false,
    }
}

fn completion(content: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content.to_string()}}]
    }))
}

fn ranking(roster_id: u32, rank: u32) -> Value {
    json!({
        "roster_id": roster_id,
        "rank": rank,
        "summary": "Riding Mahomes again",
        "analysis": {
            "key_players": [{"name": "Patrick Mahomes", "note": "still elite"}],
            "bench_potential": "Jefferson is wasted on the bench lmao",
            "make_or_break": "Offensive line health"
        }
    })
}

async fn mount_completion(llm: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(response)
        .expect(1)
        .mount(llm)
        .await;
}

/// Test power rankings written from a valid completion
#[tokio::test]
async fn test_power_rankings_written() {
    let sleeper_server = MockServer::start().await;
    mount_league(&sleeper_server).await;
    let llm_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.7, "model": "test-model"})))
        .and(body_string_contains("Patrick Mahomes (QB - KC)"))
        .respond_with(completion(json!({"rankings": [ranking(2, 2), ranking(1, 1)]})))
        .expect(1)
        .mount(&llm_server)
        .await;

    let temp_dir = tempdir().unwrap();
    let layout = SiteLayout::new(temp_dir.path());
    let target = LeagueTarget::new(LEAGUE_ID, 2025, 1);
    let llm = LlmClient::new(http(), llm_server.uri(), "sk-test");
    let mut players = PlayerDirectoryCache::new();

    let path = generate_power_rankings(
        &sleeper_client(&sleeper_server),
        &llm,
        &mut players,
        &target,
        &layout,
        &options(),
    )
    .await
    .unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["league_id"], LEAGUE_ID);
    assert_eq!(written["rankings"][0]["roster_id"], 1);
    assert_eq!(written["rankings"][0]["team_name"], "Alpha Dogs");
    assert_eq!(written["rankings"][1]["team_name"], "bravo");
    assert_eq!(
        written["rankings"][0]["analysis"]["key_players"][0]["note"],
        "still elite"
    );
}

/// Test that a ranking without a summary fails and leaves the old file alone
#[tokio::test]
async fn test_missing_summary_writes_nothing() {
    let sleeper_server = MockServer::start().await;
    mount_league(&sleeper_server).await;
    let llm_server = MockServer::start().await;
    let mut bad = ranking(1, 1);
    bad.as_object_mut().unwrap().remove("summary");
    mount_completion(&llm_server, completion(json!({"rankings": [bad, ranking(2, 2)]}))).await;

    let temp_dir = tempdir().unwrap();
    let layout = SiteLayout::new(temp_dir.path());
    let target = LeagueTarget::new(LEAGUE_ID, 2025, 1);
    let out_path = layout.power_rankings(2025, 1);
    std::fs::create_dir_all(out_path.parent().unwrap()).unwrap();
    std::fs::write(&out_path, "previous").unwrap();

    let llm = LlmClient::new(http(), llm_server.uri(), "sk-test");
    let mut players = PlayerDirectoryCache::new();
    let err = generate_power_rankings(
        &sleeper_client(&sleeper_server),
        &llm,
        &mut players,
        &target,
        &layout,
        &options(),
    )
    .await
    .unwrap_err();

    assert!(err.is_schema_mismatch());
    assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "previous");
}

/// Test predictions use the week's rankings and fenced JSON is accepted
#[tokio::test]
async fn test_matchup_predictions_written() {
    let sleeper_server = MockServer::start().await;
    mount_league(&sleeper_server).await;
    let llm_server = MockServer::start().await;

    let answer = json!({
        "predictions": [{"home_roster_id": 2, "away_roster_id": 1,
                         "predicted_winner_roster_id": 1, "reasoning": "Mahomes"}],
        "spicy_matchup": {"home_roster_id": 1, "away_roster_id": 2, "why": "rivalry week"}
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.9})))
        .and(body_string_contains("roster_id=2: rank=1 team=bravo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": format!("```json\n{answer}\n```")}}]
        })))
        .expect(1)
        .mount(&llm_server)
        .await;

    let temp_dir = tempdir().unwrap();
    let layout = SiteLayout::new(temp_dir.path());
    let rankings_path = layout.power_rankings(2025, 1);
    std::fs::create_dir_all(rankings_path.parent().unwrap()).unwrap();
    std::fs::write(
        &rankings_path,
        json!({"league_id": LEAGUE_ID, "season": 2025, "week": 1, "rankings": [
            {"roster_id": 2, "team_name": "bravo", "rank": 1, "summary": "",
             "analysis": {"key_players": [], "bench_potential": "", "make_or_break": ""}},
            {"roster_id": 1, "team_name": "Alpha Dogs", "rank": 2, "summary": "",
             "analysis": {"key_players": [], "bench_potential": "", "make_or_break": ""}}
        ]})
        .to_string(),
    )
    .unwrap();

    let llm = LlmClient::new(http(), llm_server.uri(), "sk-test");
    let mut players = PlayerDirectoryCache::new();
    let path = generate_matchup_predictions(
        &sleeper_client(&sleeper_server),
        &llm,
        &mut players,
        &LeagueTarget::new(LEAGUE_ID, 2025, 1),
        &layout,
        &options(),
    )
    .await
    .unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["week"], 1);
    assert_eq!(written["predictions"][0]["predicted_winner_roster_id"], 1);
    assert_eq!(written["spicy_matchup"]["why"], "rivalry week");
}

/// Test that a winner outside the matchup is rejected
#[tokio::test]
async fn test_prediction_with_stray_winner_is_rejected() {
    let sleeper_server = MockServer::start().await;
    mount_league(&sleeper_server).await;
    let llm_server = MockServer::start().await;
    mount_completion(
        &llm_server,
        completion(json!({
            "predictions": [{"home_roster_id": 2, "away_roster_id": 1,
                             "predicted_winner_roster_id": 7, "reasoning": "vibes"}],
            "spicy_matchup": {"home_roster_id": 2, "away_roster_id": 1, "why": "chaos"}
        })),
    )
    .await;

    let temp_dir = tempdir().unwrap();
    let layout = SiteLayout::new(temp_dir.path());
    let llm = LlmClient::new(http(), llm_server.uri(), "sk-test");
    let mut players = PlayerDirectoryCache::new();
    let err = generate_matchup_predictions(
        &sleeper_client(&sleeper_server),
        &llm,
        &mut players,
        &LeagueTarget::new(LEAGUE_ID, 2025, 1),
        &layout,
        &options(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::SchemaMismatch { .. }));
    assert!(!layout.matchup_predictions(2025, 1).exists());
}

/// Test that predictions must match the week's real pairings
#[tokio::test]
async fn test_prediction_for_invented_pairing_is_rejected() {
    let sleeper_server = MockServer::start().await;
    mount_league(&sleeper_server).await;
    let llm_server = MockServer::start().await;
    mount_completion(
        &llm_server,
        completion(json!({
            "predictions": [{"home_roster_id": 1, "away_roster_id": 1,
                             "predicted_winner_roster_id": 1, "reasoning": "mirror match"}],
            "spicy_matchup": {"home_roster_id": 1, "away_roster_id": 1, "why": "chaos"}
        })),
    )
    .await;

    let temp_dir = tempdir().unwrap();
    let layout = SiteLayout::new(temp_dir.path());
    let llm = LlmClient::new(http(), llm_server.uri(), "sk-test");
    let mut players = PlayerDirectoryCache::new();
    let err = generate_matchup_predictions(
        &sleeper_client(&sleeper_server),
        &llm,
        &mut players,
        &LeagueTarget::new(LEAGUE_ID, 2025, 1),
        &layout,
        &options(),
    )
    .await
    .unwrap_err();

    assert!(err.is_schema_mismatch());
    assert!(err.to_string().contains("not a matchup this week"));
    assert!(!layout.matchup_predictions(2025, 1).exists());
}
