//! Exchange-messaging relay server for Torikae.
//!
//! Tracks which users hold a live WebSocket connection, relays chat
//! messages between the two participants of a skill exchange when both
//! are online, stores messages for later pull when the receiver is
//! offline, and enforces the exchange lifecycle state machine.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, run_server};
