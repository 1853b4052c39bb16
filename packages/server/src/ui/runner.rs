//! Server runner: router construction and serving.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::ui::{handler, signal, state::AppState};

/// Network configuration for the relay server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9100,
        }
    }
}

/// Build the application router over the given state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/debug/connections", get(handler::debug_connections))
        .route("/api/exchanges", post(handler::create_exchange))
        .route("/api/exchanges/{exchange_id}", get(handler::get_exchange))
        .route(
            "/api/exchanges/{exchange_id}/status",
            put(handler::update_exchange_status),
        )
        .route(
            "/api/exchanges/{exchange_id}/messages",
            get(handler::get_exchange_messages),
        )
        .route(
            "/api/messages/conversation/{user_a}/{user_b}",
            get(handler::get_conversation),
        )
        .route(
            "/api/messages/unread/{user_id}",
            get(handler::get_unread_messages),
        )
        .route(
            "/api/messages/{message_id}/read",
            put(handler::mark_message_read),
        )
        .route("/ws", get(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), std::io::Error> {
    let state = Arc::new(AppState::in_memory());
    let router = app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Relay server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await?;

    tracing::info!("Relay server stopped");
    Ok(())
}
