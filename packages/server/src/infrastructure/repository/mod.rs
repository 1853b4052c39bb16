//! Repository implementations.
//!
//! Concrete implementations of the repository traits defined in the domain
//! layer. The UseCase layer depends on the traits, never on these types
//! directly (dependency inversion).

pub mod inmemory;

pub use inmemory::{InMemoryExchangeRepository, InMemoryMessageRepository};
