//! In-memory MessageRepository implementation.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ExchangeId, MessageContent, MessageRepository, RepositoryError, Timestamp, UserId,
};

/// Message store backed by a mutex-guarded Vec.
///
/// Rows are appended in creation order, so every query returns results
/// already ordered by `created_at` (ids and timestamps advance together
/// within one process).
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
    next_id: AtomicI64,
}

impl InMemoryMessageRepository {
    /// Create an empty message store.
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: MessageContent,
        exchange_id: Option<ExchangeId>,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let message = ChatMessage::new(id, sender_id, receiver_id, exchange_id, content, created_at);

        let mut messages = self.messages.lock().await;
        messages.push(message.clone());

        Ok(message)
    }

    async fn get(&self, id: i64) -> Result<ChatMessage, RepositoryError> {
        let messages = self.messages.lock().await;
        messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(RepositoryError::MessageNotFound(id))
    }

    async fn mark_read(&self, id: i64) -> Result<ChatMessage, RepositoryError> {
        let mut messages = self.messages.lock().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepositoryError::MessageNotFound(id))?;
        message.read = true;
        Ok(message.clone())
    }

    async fn by_exchange(
        &self,
        exchange_id: ExchangeId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.exchange_id == Some(exchange_id))
            .cloned()
            .collect())
    }

    async fn between_users(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b)
                    || (m.sender_id == b && m.receiver_id == a)
            })
            .cloned()
            .collect())
    }

    async fn unread_for(&self, receiver_id: UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| m.receiver_id == receiver_id && !m.read)
            .cloned()
            .collect())
    }
}
