//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    create_exchange, debug_connections, get_conversation, get_exchange, get_exchange_messages,
    get_unread_messages, health_check, mark_message_read, update_exchange_status,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
