//! CLI chat client for the Torikae relay.
//!
//! Connects to the relay's WebSocket endpoint, identifies, then bridges
//! stdin lines to chat frames toward a fixed peer and prints inbound
//! frames. The relay treats a connection as offline until it identifies,
//! so every (re)connect sends an identify frame before any chat traffic.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use torikae_server::infrastructure::dto::websocket::{ClientFrame, ServerFrame};
use torikae_shared::time::unix_ms_to_rfc3339;

pub mod input;

/// First retry delay after a failed or dropped connection.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Retry delays double up to this cap.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Client configuration from the command line.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay WebSocket URL, e.g. `ws://127.0.0.1:9100/ws`
    pub url: String,
    /// User id this client identifies as
    pub user_id: i64,
    /// Peer user id chat lines are sent to
    pub peer_id: i64,
    /// Exchange to bind outgoing messages to, if any
    pub exchange_id: Option<i64>,
}

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket connect or handshake failure
    #[error("websocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Why a connected session ended.
enum SessionEnd {
    /// stdin closed; the client is done
    InputClosed,
    /// The transport dropped; reconnect and re-identify
    ConnectionLost,
}

/// Run the chat client until stdin closes.
///
/// On unexpected close the client reconnects with exponential backoff,
/// capped at [`MAX_BACKOFF`] and reset after every successful connect.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut lines = input::spawn_line_reader();
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match connect_and_chat(&config, &mut lines).await {
            Ok(SessionEnd::InputClosed) => {
                tracing::info!("Input closed; exiting");
                return Ok(());
            }
            Ok(SessionEnd::ConnectionLost) => {
                backoff = INITIAL_BACKOFF;
                tracing::warn!(
                    "Connection lost; reconnecting in {}ms",
                    backoff.as_millis()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect: {}; retrying in {}ms",
                    e,
                    backoff.as_millis()
                );
            }
        }

        tokio::time::sleep(backoff).await;
        backoff = next_backoff(backoff);
    }
}

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}

async fn connect_and_chat(
    config: &ClientConfig,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (mut ws, _) = connect_async(config.url.as_str()).await?;
    tracing::info!("Connected to {}", config.url);

    // Until this frame is accepted the relay considers us offline
    let identify = ClientFrame::Identify {
        user_id: config.user_id,
    };
    ws.send(Message::text(serde_json::to_string(&identify).unwrap()))
        .await?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    let _ = ws.close(None).await;
                    return Ok(SessionEnd::InputClosed);
                };
                let content = line.trim().to_string();
                if content.is_empty() {
                    continue;
                }
                let frame = ClientFrame::Chat {
                    sender_id: config.user_id,
                    receiver_id: config.peer_id,
                    content,
                    exchange_id: config.exchange_id,
                };
                if ws
                    .send(Message::text(serde_json::to_string(&frame).unwrap()))
                    .await
                    .is_err()
                {
                    return Ok(SessionEnd::ConnectionLost);
                }
            }
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => print_frame(text.as_str()),
                    Some(Ok(Message::Close(_))) | None => {
                        return Ok(SessionEnd::ConnectionLost);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Transport error: {}", e);
                        return Ok(SessionEnd::ConnectionLost);
                    }
                }
            }
        }
    }
}

fn print_frame(text: &str) {
    match serde_json::from_str::<ServerFrame>(text) {
        Ok(ServerFrame::System { message }) => println!("[system] {message}"),
        Ok(ServerFrame::Error { message }) => println!("[error] {message}"),
        Ok(ServerFrame::Message { message }) => {
            println!(
                "[{}] user {}: {}",
                unix_ms_to_rfc3339(message.created_at),
                message.sender_id,
                message.content
            );
        }
        Err(_) => println!("[raw] {text}"),
    }
}
