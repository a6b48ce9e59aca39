//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, participants).

mod fixtures;

use std::time::Duration;

use fixtures::TestServer;
use tokio_tungstenite::connect_async;

async fn get_json(server: &TestServer, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .get(format!("{}{}", server.base_url(), path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get_json(&server, "/api/health").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_participants_endpoint_empty() {
    // テスト項目: 接続がなければ /api/participants は空配列を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = get_json(&server, "/api/participants").await;

    // then (期待する結果):
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_participants_endpoint_lists_connected_users() {
    // テスト項目: 接続中の参加者が username と connected_at 付きで返る
    // given (前提条件):
    let server = TestServer::start().await;
    let (_alice, _) = connect_async(server.ws_url("Alice"))
        .await
        .expect("Failed to connect");

    // when (操作): 登録はアップグレード後に行われるので、現れるまで待つ
    let mut participants = Vec::new();
    for _ in 0..50 {
        let (_, body) = get_json(&server, "/api/participants").await;
        participants = body.as_array().cloned().unwrap_or_default();
        if !participants.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // then (期待する結果):
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["username"], "Alice");
    let connected_at = participants[0]["connected_at"].as_str().unwrap();
    assert!(connected_at.ends_with("+09:00"), "JST offset: {connected_at}");
}
