//! UseCase: apply an exchange status transition.

use std::sync::Arc;

use torikae_shared::time::now_unix_ms;

use crate::domain::{Exchange, ExchangeId, ExchangeRepository, ExchangeStatus, Timestamp, UserId};

use super::error::TransitionExchangeError;

/// Validate and persist one lifecycle transition of an exchange.
///
/// The caller supplies the target status as its wire string so that an
/// unknown value surfaces as invalid input, distinct from both rejection
/// kinds the state machine produces.
pub struct TransitionExchangeUseCase {
    repository: Arc<dyn ExchangeRepository>,
}

impl TransitionExchangeUseCase {
    /// Create a new TransitionExchangeUseCase.
    pub fn new(repository: Arc<dyn ExchangeRepository>) -> Self {
        Self { repository }
    }

    /// Apply the transition requested by `actor` and return the updated
    /// exchange.
    ///
    /// # Errors
    ///
    /// * `InvalidStatus` - `target` is not one of the four valid values
    /// * `ExchangeNotFound` - no exchange stored under `exchange_id`
    /// * `Transition` - the state machine rejected the request
    /// * `Persistence` - the store rejected the write; status unchanged
    pub async fn execute(
        &self,
        exchange_id: ExchangeId,
        actor: UserId,
        target: &str,
    ) -> Result<Exchange, TransitionExchangeError> {
        let target = ExchangeStatus::parse(target).map_err(TransitionExchangeError::InvalidStatus)?;

        let mut exchange = self
            .repository
            .get(exchange_id)
            .await?
            .ok_or_else(|| TransitionExchangeError::ExchangeNotFound(exchange_id.value()))?;

        let now = Timestamp::new(now_unix_ms());
        exchange.transition(actor, target, now)?;

        let updated = self
            .repository
            .update_status(exchange_id, exchange.status, exchange.updated_at)
            .await?;

        Ok(updated)
    }
}
