//! WebSocket relay integration tests.
//!
//! Drives real client connections with tokio-tungstenite: identify, chat,
//! live push, and the store-and-forward fallback for offline receivers.

mod fixtures;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message,
};

use fixtures::TestServer;

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Read the next text frame as JSON, with a timeout so a missing frame
/// fails the test instead of hanging it.
async fn next_json(ws: &mut WsClient) -> serde_json::Value {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for a frame")
        .expect("connection closed unexpectedly")
        .expect("transport error");
    let text = msg.into_text().expect("expected a text frame");
    serde_json::from_str(text.as_str()).expect("frame should be valid JSON")
}

/// Connect, consume the welcome frame, identify and consume the ack.
async fn connect_identified(server: &TestServer, user_id: i64) -> WsClient {
    let (mut ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect");

    let welcome = next_json(&mut ws).await;
    assert_eq!(welcome["type"], "system");

    ws.send(Message::text(
        serde_json::json!({"type": "identify", "userId": user_id}).to_string(),
    ))
    .await
    .expect("Failed to send identify");

    let ack = next_json(&mut ws).await;
    assert_eq!(ack["type"], "system");

    ws
}

#[tokio::test]
async fn test_live_relay_between_two_clients() {
    // given (precondition): users 10 and 11 both identified
    let server = TestServer::start(19280).await;
    let mut alice = connect_identified(&server, 10).await;
    let mut bob = connect_identified(&server, 11).await;

    // when (operation): alice sends a direct message to bob
    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 10,
                "receiverId": 11,
                "content": "hi",
                "exchangeId": null,
            })
            .to_string(),
        ))
        .await
        .unwrap();

    // then (expected): alice is acked with the new message id
    let ack = next_json(&mut alice).await;
    assert_eq!(ack["type"], "system");

    // and bob receives exactly one pushed message frame
    let push = next_json(&mut bob).await;
    assert_eq!(push["type"], "message");
    assert_eq!(push["message"]["content"], "hi");
    assert_eq!(push["message"]["senderId"], 10);
    assert_eq!(push["message"]["receiverId"], 11);
    assert_eq!(push["message"]["read"], false);
    let message_id = push["message"]["id"].as_i64().unwrap();
    let ack_text = ack["message"].as_str().unwrap();
    assert!(ack_text.contains(&message_id.to_string()));

    // and the receiver can mark it read over the query API
    let client = reqwest::Client::new();
    let response = client
        .put(format!(
            "{}/api/messages/{}/read",
            server.base_url(),
            message_id
        ))
        .json(&serde_json::json!({"readerId": 11}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let marked: serde_json::Value = response.json().await.unwrap();
    assert_eq!(marked["read"], true);

    let response = client
        .get(format!("{}/api/messages/unread/11", server.base_url()))
        .send()
        .await
        .unwrap();
    let unread: serde_json::Value = response.json().await.unwrap();
    assert_eq!(unread.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_store_and_forward_for_offline_receiver() {
    // given (precondition): user 99 never connects
    let server = TestServer::start(19281).await;
    let mut alice = connect_identified(&server, 10).await;

    // when (operation):
    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 10,
                "receiverId": 99,
                "content": "are you there?",
                "exchangeId": null,
            })
            .to_string(),
        ))
        .await
        .unwrap();

    // then (expected): the sender is still acked
    let ack = next_json(&mut alice).await;
    assert_eq!(ack["type"], "system");

    // and the message is retrievable later via the unread lookup
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/messages/unread/99", server.base_url()))
        .send()
        .await
        .unwrap();
    let unread: serde_json::Value = response.json().await.unwrap();
    let rows = unread.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["content"], "are you there?");
    assert_eq!(rows[0]["read"], false);
}

#[tokio::test]
async fn test_sender_mismatch_is_rejected_without_persisting() {
    // given (precondition): a connection identified as user 10
    let server = TestServer::start(19282).await;
    let mut alice = connect_identified(&server, 10).await;

    // when (operation): the frame claims sender 12
    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 12,
                "receiverId": 11,
                "content": "spoofed",
                "exchangeId": null,
            })
            .to_string(),
        ))
        .await
        .unwrap();

    // then (expected): error frame, no stored row
    let error = next_json(&mut alice).await;
    assert_eq!(error["type"], "error");

    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/api/messages/unread/11", server.base_url()))
        .send()
        .await
        .unwrap();
    let unread: serde_json::Value = response.json().await.unwrap();
    assert_eq!(unread.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_exchange_bound_messages_are_queryable_by_exchange() {
    // given (precondition): an exchange and both participants online
    let server = TestServer::start(19283).await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/exchanges", server.base_url()))
        .json(&serde_json::json!({
            "requesterId": 10,
            "providerId": 11,
            "requestedSkillId": 1,
            "offeredSkillId": 2,
        }))
        .send()
        .await
        .unwrap();
    let exchange: serde_json::Value = response.json().await.unwrap();
    let exchange_id = exchange["id"].as_i64().unwrap();

    let mut alice = connect_identified(&server, 10).await;
    let mut bob = connect_identified(&server, 11).await;

    // when (operation): one bound message and one direct message
    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 10,
                "receiverId": 11,
                "content": "about our exchange",
                "exchangeId": exchange_id,
            })
            .to_string(),
        ))
        .await
        .unwrap();
    let _ = next_json(&mut alice).await;
    let _ = next_json(&mut bob).await;

    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 10,
                "receiverId": 11,
                "content": "unrelated",
                "exchangeId": null,
            })
            .to_string(),
        ))
        .await
        .unwrap();
    let _ = next_json(&mut alice).await;
    let _ = next_json(&mut bob).await;

    // then (expected): the exchange query returns only the bound message
    let response = client
        .get(format!(
            "{}/api/exchanges/{}/messages",
            server.base_url(),
            exchange_id
        ))
        .send()
        .await
        .unwrap();
    let bound: serde_json::Value = response.json().await.unwrap();
    let rows = bound.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["content"], "about our exchange");
    assert_eq!(rows[0]["exchangeId"], exchange_id);

    // and the pair conversation returns both
    let response = client
        .get(format!(
            "{}/api/messages/conversation/10/11",
            server.base_url()
        ))
        .send()
        .await
        .unwrap();
    let conversation: serde_json::Value = response.json().await.unwrap();
    assert_eq!(conversation.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_last_identify_wins_across_connections() {
    // given (precondition): user 11 identified on one connection, then on
    // a second one
    let server = TestServer::start(19284).await;
    let mut alice = connect_identified(&server, 10).await;
    let mut bob_old = connect_identified(&server, 11).await;
    let mut bob_new = connect_identified(&server, 11).await;

    // when (operation): alice messages user 11
    alice
        .send(Message::text(
            serde_json::json!({
                "type": "chat",
                "senderId": 10,
                "receiverId": 11,
                "content": "which connection?",
                "exchangeId": null,
            })
            .to_string(),
        ))
        .await
        .unwrap();
    let _ = next_json(&mut alice).await;

    // then (expected): only the most recent registration receives the push
    let push = next_json(&mut bob_new).await;
    assert_eq!(push["type"], "message");
    assert_eq!(push["message"]["content"], "which connection?");

    let nothing = tokio::time::timeout(Duration::from_millis(500), bob_old.next()).await;
    assert!(nothing.is_err(), "stale connection should receive nothing");
}
