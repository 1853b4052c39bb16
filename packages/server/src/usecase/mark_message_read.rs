//! UseCase: mark a persisted message as read.

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageRepository, UserId};

use super::error::MarkMessageReadError;

/// Flip the `read` flag of a message on behalf of its receiver.
///
/// `read` is the only mutable field of a message; the domain model rejects
/// any reader other than the receiver.
pub struct MarkMessageReadUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl MarkMessageReadUseCase {
    /// Create a new MarkMessageReadUseCase.
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// Mark the message as read and return the updated record.
    ///
    /// # Errors
    ///
    /// * `NotReceiver` - `reader` is not the message's receiver
    /// * `Persistence` - message missing, or the store rejected the write
    pub async fn execute(
        &self,
        message_id: i64,
        reader: UserId,
    ) -> Result<ChatMessage, MarkMessageReadError> {
        let mut message = self.repository.get(message_id).await?;
        message.mark_read(reader)?;

        let updated = self.repository.mark_read(message_id).await?;
        Ok(updated)
    }
}
