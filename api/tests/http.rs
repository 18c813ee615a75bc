use statsbomb_api::client::{ApiError, DataSource, StatsBombApi};
use std::path::PathBuf;

const COMPETITIONS: &str = r#"[
    {"competition_id": 11, "season_id": 37, "country_name": "Spain",
     "competition_name": "La Liga", "season_name": "2004/2005"},
    {"competition_id": 43, "season_id": 3, "country_name": "International",
     "competition_name": "FIFA World Cup", "season_name": "2018"}
]"#;

const MATCHES: &str = r#"[
    {"match_id": 68313, "match_date": "2005-05-01", "kick_off": "19:00:00.000",
     "home_team": {"home_team_id": 217, "home_team_name": "Barcelona"},
     "away_team": {"away_team_id": 206, "away_team_name": "Deportivo Alavés"},
     "home_score": 2, "away_score": 0}
]"#;

const EVENTS: &str = r#"[
    {"index": 1, "period": 1, "minute": 0, "second": 0,
     "type": {"id": 35, "name": "Starting XI"}, "team": {"id": 217, "name": "Barcelona"}},
    {"index": 2, "period": 1, "minute": 3, "second": 12,
     "type": {"id": 30, "name": "Pass"}, "player": {"id": 5503, "name": "Lionel Messi"},
     "location": [61.0, 40.1], "pass": {"goal_assist": true}}
]"#;

fn remote(server: &mockito::ServerGuard) -> StatsBombApi {
    StatsBombApi::with_source(DataSource::Remote { base_url: server.url() })
}

#[tokio::test]
async fn fetches_competitions_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/competitions.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPETITIONS)
        .create_async()
        .await;

    let comps = remote(&server).fetch_competitions().await.unwrap();
    mock.assert_async().await;
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[0].season_name, "2004/2005");
    assert_eq!(comps[1].country_name, "International");
}

#[tokio::test]
async fn fetches_matches_by_competition_and_season_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/matches/11/37.json")
        .with_status(200)
        .with_body(MATCHES)
        .create_async()
        .await;

    let matches = remote(&server).fetch_matches(11, 37).await.unwrap();
    mock.assert_async().await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_id, 68313);
    assert_eq!(matches[0].away_team, "Deportivo Alavés");
}

#[tokio::test]
async fn fetches_events_by_match_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/68313.json")
        .with_status(200)
        .with_body(EVENTS)
        .create_async()
        .await;

    let events = remote(&server).fetch_events(68313).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].player_id(), Some(5503));
    assert!(events[1].pass().is_some_and(|p| p.goal_assist));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/events/1.json")
        .with_status(404)
        .create_async()
        .await;

    let err = remote(&server).fetch_events(1).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "got {err}");
}

#[tokio::test]
async fn server_error_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/competitions.json")
        .with_status(503)
        .create_async()
        .await;

    let err = remote(&server).fetch_competitions().await.unwrap_err();
    assert!(matches!(err, ApiError::Api(..)), "got {err}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/competitions.json")
        .with_status(200)
        .with_body("{\"not\": \"a list\"}")
        .create_async()
        .await;

    let err = remote(&server).fetch_competitions().await.unwrap_err();
    assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
}

fn local_fixture(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("statsbomb-api-{name}-{}", std::process::id()));
    std::fs::create_dir_all(root.join("matches/11")).unwrap();
    std::fs::create_dir_all(root.join("events")).unwrap();
    std::fs::write(root.join("competitions.json"), COMPETITIONS).unwrap();
    std::fs::write(root.join("matches/11/37.json"), MATCHES).unwrap();
    std::fs::write(root.join("events/68313.json"), EVENTS).unwrap();
    root
}

#[tokio::test]
async fn reads_the_same_layout_from_a_local_checkout() {
    let root = local_fixture("layout");
    let api = StatsBombApi::with_source(DataSource::Local { root: root.clone() });

    assert_eq!(api.fetch_competitions().await.unwrap().len(), 2);
    assert_eq!(api.fetch_matches(11, 37).await.unwrap()[0].home_team, "Barcelona");
    assert_eq!(api.fetch_events(68313).await.unwrap().len(), 2);

    let err = api.fetch_events(4).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)), "got {err}");

    let _ = std::fs::remove_dir_all(root);
}
