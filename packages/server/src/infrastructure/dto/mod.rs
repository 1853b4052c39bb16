//! Data transfer objects for the HTTP API and the WebSocket relay protocol.

pub mod http;
pub mod websocket;
