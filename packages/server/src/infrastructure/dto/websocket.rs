//! WebSocket frame DTOs for the relay protocol.
//!
//! One JSON object per frame, UTF-8, camelCase field names. The `type` tag
//! selects the variant on both directions of the connection.

use serde::{Deserialize, Serialize};

use crate::domain::ChatMessage;

/// Frames a client may send to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ClientFrame {
    /// Bind this connection to a user identifier. Must be the first
    /// accepted frame; a later identify rebinds the connection.
    Identify { user_id: i64 },
    /// Send one chat message. `exchange_id` is null for a direct message
    /// not tied to an exchange.
    Chat {
        sender_id: i64,
        receiver_id: i64,
        content: String,
        #[serde(default)]
        exchange_id: Option<i64>,
    },
}

/// Frames the relay sends back to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ServerFrame {
    /// Welcome and acknowledgment notices.
    System { message: String },
    /// Live push of a persisted message to its receiver.
    Message { message: MessageDto },
    /// Protocol or processing error; never terminates the connection.
    Error { message: String },
}

/// Wire shape of a persisted message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub exchange_id: Option<i64>,
    pub content: String,
    pub read: bool,
    /// Unix timestamp in milliseconds; the ordering key for consumers
    pub created_at: i64,
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id.value(),
            receiver_id: message.receiver_id.value(),
            exchange_id: message.exchange_id.map(|id| id.value()),
            content: message.content.as_str().to_string(),
            read: message.read,
            created_at: message.created_at.value(),
        }
    }
}
