//! Core domain models for the exchange-messaging subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    error::{MessageError, TransitionError, ValueObjectError},
    value_object::{ExchangeId, MessageContent, Timestamp, UserId},
};

/// Lifecycle status of a skill exchange.
///
/// `pending` is the initial status. `declined` and `completed` are terminal:
/// no further transition is accepted from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
}

impl ExchangeStatus {
    /// Parse a status from its lowercase wire representation.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::ExchangeStatusUnknown` for any string
    /// outside the four valid values. This is invalid input, distinct from
    /// a transition being rejected.
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "completed" => Ok(Self::Completed),
            other => Err(ValueObjectError::ExchangeStatusUnknown(other.to_string())),
        }
    }

    /// Lowercase wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A proposed swap of one user's taught skill for another's.
///
/// Created once by the requester with status `pending`; the status is
/// mutated only through [`Exchange::transition`]; rows are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Exchange identifier
    pub id: ExchangeId,
    /// User who proposed the exchange
    pub requester_id: UserId,
    /// User who owns the requested skill
    pub provider_id: UserId,
    /// Skill the requester wants to learn (owned by the provider)
    pub requested_skill_id: i64,
    /// Skill the requester offers in return (owned by the requester)
    pub offered_skill_id: i64,
    /// Current lifecycle status
    pub status: ExchangeStatus,
    /// Timestamp when the exchange was created
    pub created_at: Timestamp,
    /// Timestamp of the last status change
    pub updated_at: Timestamp,
}

impl Exchange {
    /// Build a freshly created exchange in `pending` status.
    ///
    /// Skill ownership is validated by the profile layer at creation time
    /// and is not re-checked here.
    pub fn new(
        id: ExchangeId,
        requester_id: UserId,
        provider_id: UserId,
        requested_skill_id: i64,
        offered_skill_id: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            requester_id,
            provider_id,
            requested_skill_id,
            offered_skill_id,
            status: ExchangeStatus::Pending,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply a status transition requested by `actor`.
    ///
    /// Reachability is checked before authorization: a target that is
    /// unreachable from the current status fails with `InvalidTransition`
    /// no matter who asks.
    ///
    /// # Errors
    ///
    /// * `TransitionError::InvalidTransition` - target not reachable from
    ///   the current status
    /// * `TransitionError::NotAuthorized` - reachable, but not by this actor
    pub fn transition(
        &mut self,
        actor: UserId,
        target: ExchangeStatus,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        match (self.status, target) {
            // Only the provider answers a pending request
            (ExchangeStatus::Pending, ExchangeStatus::Accepted | ExchangeStatus::Declined) => {
                if actor != self.provider_id {
                    return Err(TransitionError::NotAuthorized {
                        actor: actor.value(),
                        target,
                    });
                }
            }
            // Either participant may close out an accepted exchange
            (ExchangeStatus::Accepted, ExchangeStatus::Completed) => {
                if actor != self.requester_id && actor != self.provider_id {
                    return Err(TransitionError::NotAuthorized {
                        actor: actor.value(),
                        target,
                    });
                }
            }
            (from, to) => {
                return Err(TransitionError::InvalidTransition { from, to });
            }
        }

        self.status = target;
        self.updated_at = now;
        Ok(())
    }
}

/// A persisted chat message between two users.
///
/// Created exactly once by the persistence gateway; `read` is the only
/// mutable field and is set true only by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier, assigned by the persistence gateway
    pub id: i64,
    /// Sending user
    pub sender_id: UserId,
    /// Receiving user
    pub receiver_id: UserId,
    /// Exchange this message belongs to; `None` for a direct message
    pub exchange_id: Option<ExchangeId>,
    /// Message text
    pub content: MessageContent,
    /// Whether the receiver has read the message
    pub read: bool,
    /// Creation timestamp, monotonically increasing per sender
    pub created_at: Timestamp,
}

impl ChatMessage {
    /// Build a freshly persisted, unread message.
    pub fn new(
        id: i64,
        sender_id: UserId,
        receiver_id: UserId,
        exchange_id: Option<ExchangeId>,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            exchange_id,
            content,
            read: false,
            created_at,
        }
    }

    /// Mark the message as read on behalf of `reader`.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::NotReceiver` when `reader` is not the
    /// message's receiver.
    pub fn mark_read(&mut self, reader: UserId) -> Result<(), MessageError> {
        if reader != self.receiver_id {
            return Err(MessageError::NotReceiver {
                message_id: self.id,
                user_id: reader.value(),
            });
        }
        self.read = true;
        Ok(())
    }
}
