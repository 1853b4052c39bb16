//! HTTP API endpoint handlers.
//!
//! Thin pass-throughs over the repositories and usecases. The interesting
//! part is the error mapping on the status-transition endpoint: invalid
//! input, wrong actor and unreachable transition each get their own status
//! code so callers can tell them apart.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ExchangeId, ExchangeRepository, MessageRepository, RepositoryError, UserId},
    infrastructure::dto::{
        http::{
            ConnectionsDto, CreateExchangeRequest, ExchangeDto, MarkReadRequest,
            UpdateExchangeStatusRequest,
        },
        websocket::MessageDto,
    },
    ui::state::AppState,
    usecase::{
        CreateExchangeUseCase, MarkMessageReadUseCase, TransitionExchangeUseCase,
        error::{CreateExchangeError, MarkMessageReadError, TransitionExchangeError},
    },
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Currently registered relay connections (for debugging/testing)
pub async fn debug_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    let online_user_ids = state.registry.online_user_ids().await;
    Json(ConnectionsDto { online_user_ids })
}

/// Create a new exchange request (status starts at `pending`)
pub async fn create_exchange(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateExchangeRequest>,
) -> Result<(StatusCode, Json<ExchangeDto>), StatusCode> {
    let requester =
        UserId::new(body.requester_id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    let provider = UserId::new(body.provider_id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let usecase = CreateExchangeUseCase::new(state.exchanges.clone());
    match usecase
        .execute(
            requester,
            provider,
            body.requested_skill_id,
            body.offered_skill_id,
        )
        .await
    {
        Ok(exchange) => Ok((StatusCode::CREATED, Json(ExchangeDto::from(&exchange)))),
        Err(CreateExchangeError::SameParticipant(id)) => {
            tracing::warn!("Rejected self-exchange for user {}", id);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(CreateExchangeError::Persistence(e)) => {
            tracing::error!("Failed to create exchange: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get exchange detail by ID
pub async fn get_exchange(
    State(state): State<Arc<AppState>>,
    Path(exchange_id): Path<i64>,
) -> Result<Json<ExchangeDto>, StatusCode> {
    let exchange_id = ExchangeId::new(exchange_id).map_err(|_| StatusCode::NOT_FOUND)?;

    match state.exchanges.get(exchange_id).await {
        Ok(Some(exchange)) => Ok(Json(ExchangeDto::from(&exchange))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load exchange {}: {}", exchange_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Request an exchange status transition
pub async fn update_exchange_status(
    State(state): State<Arc<AppState>>,
    Path(exchange_id): Path<i64>,
    Json(body): Json<UpdateExchangeStatusRequest>,
) -> Result<Json<ExchangeDto>, StatusCode> {
    let exchange_id = ExchangeId::new(exchange_id).map_err(|_| StatusCode::NOT_FOUND)?;
    let actor = UserId::new(body.actor_id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let usecase = TransitionExchangeUseCase::new(state.exchanges.clone());
    match usecase.execute(exchange_id, actor, &body.status).await {
        Ok(exchange) => Ok(Json(ExchangeDto::from(&exchange))),
        Err(TransitionExchangeError::InvalidStatus(e)) => {
            tracing::warn!("Rejected transition of exchange {}: {}", exchange_id, e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(TransitionExchangeError::ExchangeNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(TransitionExchangeError::Transition(e)) => {
            tracing::warn!("Rejected transition of exchange {}: {}", exchange_id, e);
            match e {
                crate::domain::TransitionError::NotAuthorized { .. } => {
                    Err(StatusCode::FORBIDDEN)
                }
                crate::domain::TransitionError::InvalidTransition { .. } => {
                    Err(StatusCode::CONFLICT)
                }
            }
        }
        Err(TransitionExchangeError::Persistence(e)) => {
            tracing::error!("Failed to persist exchange {} status: {}", exchange_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Messages tied to an exchange, ordered by creation time
pub async fn get_exchange_messages(
    State(state): State<Arc<AppState>>,
    Path(exchange_id): Path<i64>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let exchange_id = ExchangeId::new(exchange_id).map_err(|_| StatusCode::NOT_FOUND)?;

    match state.messages.by_exchange(exchange_id).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(e) => {
            tracing::error!("Failed to load exchange {} messages: {}", exchange_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Messages between two users in either direction, ordered by creation time
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path((user_a, user_b)): Path<(i64, i64)>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let a = UserId::new(user_a).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    let b = UserId::new(user_b).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    match state.messages.between_users(a, b).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(e) => {
            tracing::error!("Failed to load conversation {}-{}: {}", a, b, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Unread messages for a receiver, ordered by creation time
pub async fn get_unread_messages(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let user_id = UserId::new(user_id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    match state.messages.unread_for(user_id).await {
        Ok(messages) => Ok(Json(messages.iter().map(MessageDto::from).collect())),
        Err(e) => {
            tracing::error!("Failed to load unread messages for {}: {}", user_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Mark a message as read (receiver only)
pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<i64>,
    Json(body): Json<MarkReadRequest>,
) -> Result<Json<MessageDto>, StatusCode> {
    let reader = UserId::new(body.reader_id).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    let usecase = MarkMessageReadUseCase::new(state.messages.clone());
    match usecase.execute(message_id, reader).await {
        Ok(message) => Ok(Json(MessageDto::from(&message))),
        Err(MarkMessageReadError::NotReceiver(e)) => {
            tracing::warn!("Rejected mark-read of message {}: {}", message_id, e);
            Err(StatusCode::FORBIDDEN)
        }
        Err(MarkMessageReadError::Persistence(RepositoryError::MessageNotFound(_))) => {
            Err(StatusCode::NOT_FOUND)
        }
        Err(MarkMessageReadError::Persistence(e)) => {
            tracing::error!("Failed to mark message {} read: {}", message_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
