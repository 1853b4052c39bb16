//! UI layer: the relay server's network surface.

pub mod handler;
pub mod registry;
mod runner;
mod signal;
pub mod state;

pub use runner::{ServerConfig, run_server};
