//! Domain layer error definitions.

use thiserror::Error;

use super::entity::ExchangeStatus;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId must be positive (got {0})")]
    UserIdNotPositive(i64),

    /// ExchangeId validation error
    #[error("ExchangeId must be positive (got {0})")]
    ExchangeIdNotPositive(i64),

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// ExchangeStatus outside the four valid values
    #[error("unknown exchange status '{0}' (expected pending, accepted, declined or completed)")]
    ExchangeStatusUnknown(String),
}

/// Errors raised by the exchange lifecycle state machine.
///
/// The two variants are deliberately distinct: `NotAuthorized` means "you
/// can't do that", `InvalidTransition` means "no one can do that right now".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested transition exists but the caller is not allowed to make it
    #[error("user {actor} is not allowed to set exchange status to '{target}'")]
    NotAuthorized {
        actor: i64,
        target: ExchangeStatus,
    },

    /// The requested status is not reachable from the current status,
    /// regardless of caller identity
    #[error("exchange status cannot change from '{from}' to '{to}'")]
    InvalidTransition {
        from: ExchangeStatus,
        to: ExchangeStatus,
    },
}

/// Errors related to message domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Only the receiver may mark a message as read
    #[error("user {user_id} is not the receiver of message {message_id}")]
    NotReceiver { message_id: i64, user_id: i64 },
}

/// Errors surfaced by the persistence gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No exchange stored under the given id
    #[error("exchange {0} not found")]
    ExchangeNotFound(i64),

    /// No message stored under the given id
    #[error("message {0} not found")]
    MessageNotFound(i64),

    /// The backing store failed; the requested change was not applied
    #[error("storage failure: {0}")]
    Backend(String),
}
