//! WebSocket relay: per-connection frame processing.
//!
//! Each connection gets one [`RelaySession`] owned by its reader task. The
//! session never leaves that task; the only shared state it touches is the
//! connection registry and the repositories behind `AppState`. Frames from
//! one connection are processed strictly in arrival order. No frame, however
//! malformed, terminates the connection.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use torikae_shared::time::now_unix_ms;

use crate::{
    domain::{ExchangeId, MessageContent, UserId},
    infrastructure::dto::websocket::{ClientFrame, MessageDto, ServerFrame},
    ui::{registry::ConnectionHandle, state::AppState},
    usecase::SendMessageUseCase,
};

/// Lifecycle of one relay connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    /// Nothing accepted yet except an identify frame
    Unidentified,
    /// Bound to a user id; chat frames must carry this id as sender
    Identified(UserId),
    /// Transport gone; the session ignores everything
    Closed,
}

/// Per-connection protocol state.
///
/// Identity is fixed at identify time; a chat frame's claimed `senderId` is
/// never trusted on its own.
pub(crate) struct RelaySession {
    state: Arc<AppState>,
    outbound: mpsc::UnboundedSender<String>,
    phase: SessionPhase,
}

impl RelaySession {
    pub(crate) fn new(state: Arc<AppState>, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            state,
            outbound,
            phase: SessionPhase::Unidentified,
        }
    }

    fn send_frame(&self, frame: &ServerFrame) {
        let json = serde_json::to_string(frame).unwrap();
        if self.outbound.send(json).is_err() {
            tracing::warn!("Outbound channel closed while sending a frame");
        }
    }

    fn send_system(&self, message: String) {
        self.send_frame(&ServerFrame::System { message });
    }

    fn send_error(&self, message: String) {
        self.send_frame(&ServerFrame::Error { message });
    }

    /// Greet a freshly opened connection.
    pub(crate) fn welcome(&self) {
        self.send_system("connected; identify to start chatting".to_string());
    }

    /// Process one inbound text frame.
    pub(crate) async fn handle_frame(&mut self, text: &str) {
        if self.phase == SessionPhase::Closed {
            return;
        }

        let frame = match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Failed to parse frame: {}", e);
                self.send_error(format!("malformed frame: {e}"));
                return;
            }
        };

        match frame {
            ClientFrame::Identify { user_id } => self.handle_identify(user_id).await,
            ClientFrame::Chat {
                sender_id,
                receiver_id,
                content,
                exchange_id,
            } => {
                self.handle_chat(sender_id, receiver_id, content, exchange_id)
                    .await
            }
        }
    }

    async fn handle_identify(&mut self, user_id: i64) {
        let user_id = match UserId::new(user_id) {
            Ok(id) => id,
            Err(e) => {
                self.send_error(e.to_string());
                return;
            }
        };

        // Rebinding under a different user must not leave the old
        // registration dangling
        if let SessionPhase::Identified(previous) = self.phase
            && previous != user_id
        {
            self.state.registry.unregister(previous).await;
        }

        self.state
            .registry
            .register(
                user_id,
                ConnectionHandle {
                    sender: self.outbound.clone(),
                    connected_at: now_unix_ms(),
                },
            )
            .await;
        self.phase = SessionPhase::Identified(user_id);

        tracing::info!("Connection identified as user {}", user_id);
        self.send_system(format!("identified as user {user_id}"));
    }

    async fn handle_chat(
        &mut self,
        sender_id: i64,
        receiver_id: i64,
        content: String,
        exchange_id: Option<i64>,
    ) {
        let identified = match self.phase {
            SessionPhase::Identified(id) => id,
            _ => {
                self.send_error("identify before sending chat frames".to_string());
                return;
            }
        };

        if sender_id != identified.value() {
            tracing::warn!(
                "Rejecting chat frame claiming sender {} on a connection identified as {}",
                sender_id,
                identified
            );
            self.send_error(format!(
                "senderId {sender_id} does not match identified user {identified}"
            ));
            return;
        }

        let receiver_id = match UserId::new(receiver_id) {
            Ok(id) => id,
            Err(e) => {
                self.send_error(e.to_string());
                return;
            }
        };
        let content = match MessageContent::new(content) {
            Ok(content) => content,
            Err(e) => {
                self.send_error(e.to_string());
                return;
            }
        };
        let exchange_id = match exchange_id.map(ExchangeId::new).transpose() {
            Ok(id) => id,
            Err(e) => {
                self.send_error(e.to_string());
                return;
            }
        };

        // Whether the exchange is still open is deliberately not checked;
        // chat is allowed on declined and completed exchanges
        let usecase = SendMessageUseCase::new(self.state.messages.clone());
        let message = match usecase
            .execute(identified, receiver_id, content, exchange_id)
            .await
        {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to persist message from {}: {}", identified, e);
                self.send_error("failed to store message".to_string());
                return;
            }
        };

        self.send_system(format!("message {} sent", message.id));

        // Live push when the receiver is registered; otherwise the stored
        // row is the delivery
        if let Some(handle) = self.state.registry.lookup(receiver_id).await {
            let push = ServerFrame::Message {
                message: MessageDto::from(&message),
            };
            let json = serde_json::to_string(&push).unwrap();
            if handle.sender.send(json).is_err() {
                tracing::warn!(
                    "Failed to push message {} to user {}",
                    message.id,
                    receiver_id
                );
            }
        } else {
            tracing::debug!(
                "User {} offline; message {} stored for later pull",
                receiver_id,
                message.id
            );
        }
    }

    /// Transport closed: drop the registration fixed at identify time.
    pub(crate) async fn finish(&mut self) {
        if let SessionPhase::Identified(user_id) = self.phase {
            self.state.registry.unregister(user_id).await;
            tracing::info!("User {} disconnected and removed from registry", user_id);
        }
        self.phase = SessionPhase::Closed;
    }
}

/// Upgrade handler for `GET /ws`.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Drain the session's outbound channel into the socket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let mut session = RelaySession::new(state, tx);
    session.welcome();

    while let Some(msg) = ws_receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket transport error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => session.handle_frame(&text).await,
            Message::Close(_) => break,
            // Ping/pong is handled by the protocol layer
            _ => {}
        }
    }

    session.finish().await;
    send_task.abort();
}
