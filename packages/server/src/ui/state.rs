//! Server state shared across connection tasks and HTTP handlers.

use std::sync::Arc;

use crate::domain::{ExchangeRepository, MessageRepository};
use crate::infrastructure::repository::{InMemoryExchangeRepository, InMemoryMessageRepository};
use crate::ui::registry::ConnectionRegistry;

/// Shared application state.
///
/// The registry is the only ephemeral piece; the repositories stand in for
/// the durable persistence gateway.
pub struct AppState {
    /// Live-connection table, one entry per reachable user
    pub registry: ConnectionRegistry,
    /// Durable message store
    pub messages: Arc<dyn MessageRepository>,
    /// Durable exchange store
    pub exchanges: Arc<dyn ExchangeRepository>,
}

impl AppState {
    /// Build state backed by the in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            messages: Arc::new(InMemoryMessageRepository::new()),
            exchanges: Arc::new(InMemoryExchangeRepository::new()),
        }
    }
}
