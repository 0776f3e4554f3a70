//! End-to-end matchmaking scenarios over real HTTP connections.

use lobby_server::config::LobbyConfig;
use reqwest::{Method, StatusCode};

mod common;

#[tokio::test]
async fn test_pair_receives_identical_url() {
    let lobby = common::start_lobby(LobbyConfig::default()).await;

    let mut first = lobby.client("alpha.example:8080").find_match().await.unwrap();
    let waiting = first.next_record().await.unwrap().unwrap();
    assert_eq!(waiting.status, "waiting");
    assert_eq!(waiting.message, "Waiting for opponent...");
    assert_eq!(waiting.ws_url, None);

    let mut second = lobby.client("beta.example:8080").find_match().await.unwrap();
    let second_record = second.next_record().await.unwrap().unwrap();
    assert_eq!(second_record.status, "matched");
    assert_eq!(second_record.message, "Opponent found!");
    assert_eq!(
        second_record.ws_url.as_deref(),
        Some("ws://beta.example:8081/game")
    );
    assert!(second.next_record().await.unwrap().is_none(), "second stream has one record");

    let first_record = first.next_record().await.unwrap().unwrap();
    assert_eq!(first_record, second_record);
    assert!(first.next_record().await.unwrap().is_none());
}

#[tokio::test]
async fn test_lone_player_times_out() {
    let lobby = common::start_lobby(common::quick_timeout_config(1)).await;

    let mut session = lobby.client("alpha.example").find_match().await.unwrap();
    assert_eq!(session.next_record().await.unwrap().unwrap().status, "waiting");

    let timeout = session.next_record().await.unwrap().unwrap();
    assert_eq!(timeout.status, "timeout");
    assert_eq!(timeout.message, "No opponent found. Please try again.");
    assert_eq!(timeout.ws_url, None);
    assert!(session.next_record().await.unwrap().is_none());

    // The lobby is empty again: the next player waits rather than pairs.
    let health = lobby.client("alpha.example").health().await.unwrap();
    assert_eq!(health["waiting"], false);
}

#[tokio::test]
async fn test_consecutive_pairs_do_not_leak() {
    let lobby = common::start_lobby(LobbyConfig::default()).await;

    for (a, b) in [("a.example", "b.example"), ("c.example", "d.example")] {
        let mut first = lobby.client(a).find_match().await.unwrap();
        assert_eq!(first.next_record().await.unwrap().unwrap().status, "waiting");

        let second = lobby.client(b).find_match().await.unwrap();
        let second = second.outcome().await.unwrap();
        let first = first.outcome().await.unwrap();

        let expected = format!("ws://{}:8081/game", b);
        assert_eq!(second.ws_url.as_deref(), Some(expected.as_str()));
        assert_eq!(first.ws_url, second.ws_url);
    }
}

#[tokio::test]
async fn test_third_player_starts_fresh_slot() {
    let lobby = common::start_lobby(LobbyConfig::default()).await;

    let mut first = lobby.client("a.example").find_match().await.unwrap();
    first.next_record().await.unwrap();
    lobby.client("b.example").find_match().await.unwrap().outcome().await.unwrap();
    assert_eq!(first.outcome().await.unwrap().status, "matched");

    let mut third = lobby.client("c.example").find_match().await.unwrap();
    assert_eq!(third.next_record().await.unwrap().unwrap().status, "waiting");

    let health = lobby.client("c.example").health().await.unwrap();
    assert_eq!(health["waiting"], true);
}

#[tokio::test]
async fn test_match_response_headers() {
    let lobby = common::start_lobby(LobbyConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .request(Method::OPTIONS, format!("{}/match", lobby.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(res.headers()["access-control-allow-headers"], "Content-Type");
    assert!(res.headers().contains_key("x-request-id"));
    assert!(res.text().await.unwrap().is_empty());

    let res = client
        .post(format!("{}/match", lobby.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let health = lobby.client("localhost").health().await.unwrap();
    assert_eq!(health["waiting"], false, "rejected methods must not join");
}

#[tokio::test]
async fn test_match_stream_is_chunked_json() {
    let lobby = common::start_lobby(common::quick_timeout_config(1)).await;

    let res = reqwest::Client::new()
        .get(format!("{}/match", lobby.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.headers()["transfer-encoding"], "chunked");
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let body = res.text().await.unwrap();
    let statuses: Vec<String> = body
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .map(|record| record["status"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(statuses, vec!["waiting", "timeout"]);
}
