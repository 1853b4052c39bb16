//! In-memory repository implementations.
//!
//! Mutex-guarded collections standing in for a relational store. Identifier
//! sequences are process-local; a DBMS-backed implementation would move the
//! sequence and the row storage behind the same traits.

pub mod exchange;
pub mod message;

pub use exchange::InMemoryExchangeRepository;
pub use message::InMemoryMessageRepository;
