//! Shared utilities for the Torikae skill-exchange application.
//!
//! Both the relay server and the CLI client link this crate for logging
//! setup and timestamp handling.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
pub use time::{now_unix_ms, unix_ms_to_rfc3339};
