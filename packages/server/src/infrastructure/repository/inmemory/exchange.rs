//! In-memory ExchangeRepository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Exchange, ExchangeId, ExchangeRepository, ExchangeStatus, RepositoryError, Timestamp, UserId,
};

/// Exchange store backed by a mutex-guarded HashMap.
pub struct InMemoryExchangeRepository {
    exchanges: Mutex<HashMap<i64, Exchange>>,
    next_id: AtomicI64,
}

impl InMemoryExchangeRepository {
    /// Create an empty exchange store.
    pub fn new() -> Self {
        Self {
            exchanges: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryExchangeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeRepository for InMemoryExchangeRepository {
    async fn create(
        &self,
        requester_id: UserId,
        provider_id: UserId,
        requested_skill_id: i64,
        offered_skill_id: i64,
        created_at: Timestamp,
    ) -> Result<Exchange, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        // The sequence starts at 1, so the id is always valid here
        let exchange_id = ExchangeId::new(id)
            .map_err(|e| RepositoryError::Backend(e.to_string()))?;
        let exchange = Exchange::new(
            exchange_id,
            requester_id,
            provider_id,
            requested_skill_id,
            offered_skill_id,
            created_at,
        );

        let mut exchanges = self.exchanges.lock().await;
        exchanges.insert(id, exchange.clone());

        Ok(exchange)
    }

    async fn get(&self, id: ExchangeId) -> Result<Option<Exchange>, RepositoryError> {
        let exchanges = self.exchanges.lock().await;
        Ok(exchanges.get(&id.value()).cloned())
    }

    async fn update_status(
        &self,
        id: ExchangeId,
        status: ExchangeStatus,
        updated_at: Timestamp,
    ) -> Result<Exchange, RepositoryError> {
        let mut exchanges = self.exchanges.lock().await;
        let exchange = exchanges
            .get_mut(&id.value())
            .ok_or(RepositoryError::ExchangeNotFound(id.value()))?;
        exchange.status = status;
        exchange.updated_at = updated_at;
        Ok(exchange.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        // given (precondition):
        let repository = InMemoryExchangeRepository::new();

        // when (operation):
        let created = repository
            .create(
                UserId::new(3).unwrap(),
                UserId::new(2).unwrap(),
                11,
                12,
                Timestamp::new(1000),
            )
            .await
            .unwrap();
        let fetched = repository.get(created.id).await.unwrap();

        // then (expected):
        assert_eq!(fetched, Some(created.clone()));
        assert_eq!(created.status, ExchangeStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        // given (precondition):
        let repository = InMemoryExchangeRepository::new();

        // when (operation):
        let result = repository.get(ExchangeId::new(404).unwrap()).await.unwrap();

        // then (expected): absence is not an error
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_update_status_persists_new_status_and_timestamp() {
        // given (precondition):
        let repository = InMemoryExchangeRepository::new();
        let created = repository
            .create(
                UserId::new(3).unwrap(),
                UserId::new(2).unwrap(),
                11,
                12,
                Timestamp::new(1000),
            )
            .await
            .unwrap();

        // when (operation):
        let updated = repository
            .update_status(created.id, ExchangeStatus::Accepted, Timestamp::new(2000))
            .await
            .unwrap();

        // then (expected): only status and updated_at change
        assert_eq!(updated.status, ExchangeStatus::Accepted);
        assert_eq!(updated.updated_at, Timestamp::new(2000));
        assert_eq!(updated.created_at, Timestamp::new(1000));
        assert_eq!(updated.requester_id, created.requester_id);
    }

    #[tokio::test]
    async fn test_update_status_missing_exchange_fails() {
        // given (precondition):
        let repository = InMemoryExchangeRepository::new();

        // when (operation):
        let result = repository
            .update_status(
                ExchangeId::new(404).unwrap(),
                ExchangeStatus::Accepted,
                Timestamp::new(2000),
            )
            .await;

        // then (expected):
        assert_eq!(result.unwrap_err(), RepositoryError::ExchangeNotFound(404));
    }
}
