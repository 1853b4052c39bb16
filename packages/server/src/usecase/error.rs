//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{MessageError, RepositoryError, TransitionError, ValueObjectError};

/// Errors returned by [`crate::usecase::CreateExchangeUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateExchangeError {
    /// Requester and provider must be two different users
    #[error("requester and provider must differ (both {0})")]
    SameParticipant(i64),

    /// The store rejected the write; nothing was created
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

/// Errors returned by [`crate::usecase::TransitionExchangeUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionExchangeError {
    /// No exchange stored under the requested id
    #[error("exchange {0} not found")]
    ExchangeNotFound(i64),

    /// The requested status string is not one of the four valid values
    #[error(transparent)]
    InvalidStatus(ValueObjectError),

    /// The state machine rejected the transition (wrong actor, or target
    /// unreachable from the current status)
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The store rejected the write; the status is unchanged
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

/// Errors returned by [`crate::usecase::SendMessageUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The store rejected the write; no message row exists
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

/// Errors returned by [`crate::usecase::MarkMessageReadUseCase`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkMessageReadError {
    /// Only the receiver may mark a message as read
    #[error(transparent)]
    NotReceiver(#[from] MessageError),

    /// The store rejected the read or write
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}
