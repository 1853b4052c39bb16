//! Connection Registry: who is currently reachable for live push.
//!
//! Process-local and ephemeral. The registry owns the only concurrently
//! mutated map in the server; every operation takes the mutex, so a lookup
//! never observes a half-updated entry. Nothing here is persisted and the
//! map is rebuilt from nothing on restart.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};

use crate::domain::UserId;

/// Live connection handle for one registered user.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    /// Outbound frame channel of the user's current connection
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp (milliseconds) when the connection identified
    pub connected_at: i64,
}

/// At most one reachable connection per user.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<UserId, ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Register a user's live connection.
    ///
    /// An existing entry is replaced silently: last identify wins. The
    /// replaced transport is not closed here; its own failure detection
    /// will eventually end it.
    pub async fn register(&self, user_id: UserId, handle: ConnectionHandle) {
        let mut connections = self.connections.lock().await;
        if connections.insert(user_id, handle).is_some() {
            tracing::debug!("Replaced existing connection for user {}", user_id);
        }
    }

    /// Look up the user's current connection handle.
    ///
    /// `None` is the normal offline case, not an error.
    pub async fn lookup(&self, user_id: UserId) -> Option<ConnectionHandle> {
        let connections = self.connections.lock().await;
        connections.get(&user_id).cloned()
    }

    /// Remove the user's registration. Removing an absent entry is a no-op.
    pub async fn unregister(&self, user_id: UserId) {
        let mut connections = self.connections.lock().await;
        connections.remove(&user_id);
    }

    /// User ids with a registered connection, for the debug endpoint.
    pub async fn online_user_ids(&self) -> Vec<i64> {
        let connections = self.connections.lock().await;
        let mut ids: Vec<i64> = connections.keys().map(|id| id.value()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
