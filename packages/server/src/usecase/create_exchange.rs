//! UseCase: create a skill-exchange request.

use std::sync::Arc;

use torikae_shared::time::now_unix_ms;

use crate::domain::{Exchange, ExchangeRepository, Timestamp, UserId};

use super::error::CreateExchangeError;

/// Create a new exchange in `pending` status on behalf of the requester.
///
/// Skill ownership is the profile layer's concern and is not checked here;
/// the one invariant enforced is that requester and provider differ.
pub struct CreateExchangeUseCase {
    repository: Arc<dyn ExchangeRepository>,
}

impl CreateExchangeUseCase {
    /// Create a new CreateExchangeUseCase.
    pub fn new(repository: Arc<dyn ExchangeRepository>) -> Self {
        Self { repository }
    }

    /// Persist the exchange request and return the stored record.
    ///
    /// # Errors
    ///
    /// * `SameParticipant` - requester and provider are the same user
    /// * `Persistence` - the store rejected the write
    pub async fn execute(
        &self,
        requester_id: UserId,
        provider_id: UserId,
        requested_skill_id: i64,
        offered_skill_id: i64,
    ) -> Result<Exchange, CreateExchangeError> {
        if requester_id == provider_id {
            return Err(CreateExchangeError::SameParticipant(requester_id.value()));
        }

        let created_at = Timestamp::new(now_unix_ms());
        let exchange = self
            .repository
            .create(
                requester_id,
                provider_id,
                requested_skill_id,
                offered_skill_id,
                created_at,
            )
            .await?;

        Ok(exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExchangeStatus;
    use crate::infrastructure::repository::InMemoryExchangeRepository;

    #[tokio::test]
    async fn test_create_exchange_starts_pending() {
        // given (precondition):
        let repository = Arc::new(InMemoryExchangeRepository::new());
        let usecase = CreateExchangeUseCase::new(repository.clone());

        // when (operation):
        let result = usecase
            .execute(UserId::new(3).unwrap(), UserId::new(2).unwrap(), 11, 12)
            .await;

        // then (expected):
        let exchange = result.unwrap();
        assert_eq!(exchange.status, ExchangeStatus::Pending);
        assert_eq!(exchange.requester_id, UserId::new(3).unwrap());
        assert_eq!(exchange.provider_id, UserId::new(2).unwrap());
        assert!(repository.get(exchange.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_exchange_with_self_fails() {
        // given (precondition):
        let repository = Arc::new(InMemoryExchangeRepository::new());
        let usecase = CreateExchangeUseCase::new(repository);

        // when (operation): requester and provider are the same user
        let result = usecase
            .execute(UserId::new(3).unwrap(), UserId::new(3).unwrap(), 11, 12)
            .await;

        // then (expected):
        assert_eq!(result.unwrap_err(), CreateExchangeError::SameParticipant(3));
    }

    #[tokio::test]
    async fn test_create_exchange_assigns_distinct_ids() {
        // given (precondition):
        let repository = Arc::new(InMemoryExchangeRepository::new());
        let usecase = CreateExchangeUseCase::new(repository);

        // when (operation):
        let first = usecase
            .execute(UserId::new(3).unwrap(), UserId::new(2).unwrap(), 11, 12)
            .await
            .unwrap();
        let second = usecase
            .execute(UserId::new(4).unwrap(), UserId::new(2).unwrap(), 11, 13)
            .await
            .unwrap();

        // then (expected):
        assert_ne!(first.id, second.id);
    }
}
