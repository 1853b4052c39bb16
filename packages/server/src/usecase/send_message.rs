//! UseCase: persist a chat message for relay or later pull.

use std::sync::Arc;

use torikae_shared::time::now_unix_ms;

use crate::domain::{
    ChatMessage, ExchangeId, MessageContent, MessageRepository, Timestamp, UserId,
};

use super::error::SendMessageError;

/// Persist one chat message.
///
/// Delivery to a live receiver is the relay handler's job; this usecase
/// guarantees exactly one stored row per accepted frame, stamped unread
/// with a creation timestamp. Whether the exchange (if any) is still open
/// is deliberately not checked here.
pub struct SendMessageUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl SendMessageUseCase {
    /// Create a new SendMessageUseCase.
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// Persist the message and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `SendMessageError::Persistence` when the store rejects the
    /// write; in that case no row exists.
    pub async fn execute(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: MessageContent,
        exchange_id: Option<ExchangeId>,
    ) -> Result<ChatMessage, SendMessageError> {
        let created_at = Timestamp::new(now_unix_ms());
        let message = self
            .repository
            .create(sender_id, receiver_id, content, exchange_id, created_at)
            .await?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::infrastructure::repository::InMemoryMessageRepository;

    #[tokio::test]
    async fn test_send_message_persists_unread_row() {
        // given (precondition):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let usecase = SendMessageUseCase::new(repository.clone());
        let sender = UserId::new(10).unwrap();
        let receiver = UserId::new(11).unwrap();

        // when (operation):
        let result = usecase
            .execute(
                sender,
                receiver,
                MessageContent::new("hi".to_string()).unwrap(),
                None,
            )
            .await;

        // then (expected): exactly one stored row, unread, id assigned
        let message = result.unwrap();
        assert!(message.id > 0);
        assert!(!message.read);
        assert_eq!(message.sender_id, sender);
        assert_eq!(message.receiver_id, receiver);
        assert_eq!(message.exchange_id, None);

        let unread = repository.unread_for(receiver).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, message.id);
    }

    #[tokio::test]
    async fn test_send_message_keeps_exchange_binding() {
        // given (precondition):
        let repository = Arc::new(InMemoryMessageRepository::new());
        let usecase = SendMessageUseCase::new(repository.clone());
        let exchange_id = ExchangeId::new(7).unwrap();

        // when (operation):
        let message = usecase
            .execute(
                UserId::new(10).unwrap(),
                UserId::new(11).unwrap(),
                MessageContent::new("see you at 5".to_string()).unwrap(),
                Some(exchange_id),
            )
            .await
            .unwrap();

        // then (expected):
        assert_eq!(message.exchange_id, Some(exchange_id));
        let by_exchange = repository.by_exchange(exchange_id).await.unwrap();
        assert_eq!(by_exchange.len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_surfaces_persistence_failure() {
        // given (precondition): a store that rejects every write
        let mut repository = crate::domain::repository::MockMessageRepository::new();
        repository
            .expect_create()
            .returning(|_, _, _, _, _| Err(RepositoryError::Backend("disk full".to_string())));
        let usecase = SendMessageUseCase::new(Arc::new(repository));

        // when (operation):
        let result = usecase
            .execute(
                UserId::new(10).unwrap(),
                UserId::new(11).unwrap(),
                MessageContent::new("hi".to_string()).unwrap(),
                None,
            )
            .await;

        // then (expected):
        assert_eq!(
            result.unwrap_err(),
            SendMessageError::Persistence(RepositoryError::Backend("disk full".to_string()))
        );
    }
}
