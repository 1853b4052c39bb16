//! UseCase layer.
//!
//! Business operations invoked from the UI layer. Each usecase depends on
//! the repository traits defined in the domain layer, never on a concrete
//! store.

pub mod create_exchange;
pub mod error;
pub mod mark_message_read;
pub mod send_message;
pub mod transition_exchange;

pub use create_exchange::CreateExchangeUseCase;
pub use error::{CreateExchangeError, MarkMessageReadError, SendMessageError, TransitionExchangeError};
pub use mark_message_read::MarkMessageReadUseCase;
pub use send_message::SendMessageUseCase;
pub use transition_exchange::TransitionExchangeUseCase;
