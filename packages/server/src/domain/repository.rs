//! Repository traits for the persistence gateway.
//!
//! The domain layer defines these traits; the infrastructure layer provides
//! the implementations (dependency inversion). UseCases and handlers depend
//! only on the traits.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{
    entity::{ChatMessage, Exchange, ExchangeStatus},
    error::RepositoryError,
    value_object::{ExchangeId, MessageContent, Timestamp, UserId},
};

/// Durable store for chat messages.
///
/// The store assigns identifiers and stamps `read = false` on creation.
/// A single operation is atomic; cross-operation consistency is the
/// caller's concern.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message and return the stored record.
    async fn create(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: MessageContent,
        exchange_id: Option<ExchangeId>,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;

    /// Fetch a message by id.
    async fn get(&self, id: i64) -> Result<ChatMessage, RepositoryError>;

    /// Set the `read` flag of a message and return the updated record.
    async fn mark_read(&self, id: i64) -> Result<ChatMessage, RepositoryError>;

    /// All messages tied to an exchange, ordered by creation time.
    async fn by_exchange(&self, exchange_id: ExchangeId)
    -> Result<Vec<ChatMessage>, RepositoryError>;

    /// All messages between two users in either direction, ordered by
    /// creation time.
    async fn between_users(&self, a: UserId, b: UserId)
    -> Result<Vec<ChatMessage>, RepositoryError>;

    /// All unread messages addressed to a receiver, ordered by creation time.
    async fn unread_for(&self, receiver_id: UserId) -> Result<Vec<ChatMessage>, RepositoryError>;
}

/// Durable store for skill exchanges.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExchangeRepository: Send + Sync {
    /// Persist a new exchange in `pending` status and return the stored
    /// record with its assigned id.
    async fn create(
        &self,
        requester_id: UserId,
        provider_id: UserId,
        requested_skill_id: i64,
        offered_skill_id: i64,
        created_at: Timestamp,
    ) -> Result<Exchange, RepositoryError>;

    /// Fetch an exchange by id; `None` when no such exchange exists.
    async fn get(&self, id: ExchangeId) -> Result<Option<Exchange>, RepositoryError>;

    /// Persist a new status and `updated_at`, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ExchangeNotFound` when the id is absent.
    async fn update_status(
        &self,
        id: ExchangeId,
        status: ExchangeStatus,
        updated_at: Timestamp,
    ) -> Result<Exchange, RepositoryError>;
}
