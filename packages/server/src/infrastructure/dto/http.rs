//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use torikae_shared::time::unix_ms_to_rfc3339;

use crate::domain::Exchange;

/// Request body for creating an exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRequest {
    pub requester_id: i64,
    pub provider_id: i64,
    pub requested_skill_id: i64,
    pub offered_skill_id: i64,
}

/// Request body for an exchange status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExchangeStatusRequest {
    /// User requesting the transition
    pub actor_id: i64,
    /// Target status as its lowercase wire string
    pub status: String,
}

/// Request body for marking a message read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub reader_id: i64,
}

/// Exchange representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDto {
    pub id: i64,
    pub requester_id: i64,
    pub provider_id: i64,
    pub requested_skill_id: i64,
    pub offered_skill_id: i64,
    pub status: String,
    pub created_at: String, // ISO 8601
    pub updated_at: String, // ISO 8601
}

impl From<&Exchange> for ExchangeDto {
    fn from(exchange: &Exchange) -> Self {
        Self {
            id: exchange.id.value(),
            requester_id: exchange.requester_id.value(),
            provider_id: exchange.provider_id.value(),
            requested_skill_id: exchange.requested_skill_id,
            offered_skill_id: exchange.offered_skill_id,
            status: exchange.status.as_str().to_string(),
            created_at: unix_ms_to_rfc3339(exchange.created_at.value()),
            updated_at: unix_ms_to_rfc3339(exchange.updated_at.value()),
        }
    }
}

/// Currently registered connections, for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsDto {
    pub online_user_ids: Vec<i64>,
}
