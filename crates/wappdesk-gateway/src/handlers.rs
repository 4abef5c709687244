// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook and admin API.
//!
//! The webhook handler acknowledges everything it ignores (non-incoming
//! types, unparseable shapes) with 200 so the provider never redelivers;
//! only real processing errors surface as 500.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use wappdesk_core::types::{LogKind, LogQuery, MessageDirection, MessageQuery, MessageStatus};
use wappdesk_greenapi::notification::{parse_inbound, Notification};

use crate::server::GatewayState;

/// Body for POST /api/wapp/send.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response for POST /api/wapp/send.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub id_message: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub status: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn ack(status: &'static str) -> Response {
    (StatusCode::OK, Json(AckResponse { status })).into_response()
}

fn bad_request(error: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/wapp/received
///
/// Green API webhook entry point. Non-incoming webhook types and payloads
/// missing sender/message data are acknowledged and ignored; redelivering
/// them any number of times mutates nothing.
pub async fn post_received(
    State(state): State<GatewayState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let notification: Notification = match serde_json::from_value(body) {
        Ok(notification) => notification,
        Err(e) => {
            debug!(error = %e, "unparseable webhook payload, acknowledging");
            return ack("ignored");
        }
    };

    let Some(inbound) = parse_inbound(&notification) else {
        return ack("ignored");
    };

    match state.engine.handle_inbound(inbound).await {
        Ok(()) => ack("ok"),
        Err(e) => {
            error!(error = %e, "webhook processing failed");
            internal_error(e)
        }
    }
}

/// POST /api/wapp/send
///
/// Manual outbound send: 400 when phone or message is missing, 200 with the
/// provider message id on success, 500 on send failure.
pub async fn post_send(
    State(state): State<GatewayState>,
    Json(body): Json<SendRequest>,
) -> Response {
    let (Some(phone), Some(message)) = (body.phone, body.message) else {
        return bad_request("phone and message are required");
    };
    if phone.is_empty() || message.is_empty() {
        return bad_request("phone and message are required");
    }

    match state.sender.send_text(&phone, &message).await {
        Ok(id) => (StatusCode::OK, Json(SendResponse { id_message: id.0 })).into_response(),
        Err(e) => {
            error!(%phone, error = %e, "manual send failed");
            internal_error(e)
        }
    }
}

/// Query parameters for GET /api/wapp/messages.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesParams {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Shared secret consumed by the auth middleware.
    #[serde(default)]
    pub key: Option<String>,
}

/// GET /api/wapp/messages
pub async fn get_messages(
    State(state): State<GatewayState>,
    Query(params): Query<MessagesParams>,
) -> Response {
    let status = match params.status.as_deref().map(MessageStatus::from_str) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(_)) => return bad_request("unknown status"),
    };
    let direction = match params.direction.as_deref().map(MessageDirection::from_str) {
        None => None,
        Some(Ok(direction)) => Some(direction),
        Some(Err(_)) => return bad_request("unknown direction"),
    };

    let query = MessageQuery {
        filter: params.filter,
        status,
        direction,
        page: params.page,
        page_size: params.page_size,
    };
    match state.store.list_messages(&query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Query parameters for GET /api/wapp/logs.
#[derive(Debug, Default, Deserialize)]
pub struct LogsParams {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Shared secret consumed by the auth middleware.
    #[serde(default)]
    pub key: Option<String>,
}

/// GET /api/wapp/logs
pub async fn get_logs(
    State(state): State<GatewayState>,
    Query(params): Query<LogsParams>,
) -> Response {
    let kind = match params.kind.as_deref().map(LogKind::from_str) {
        None => None,
        Some(Ok(kind)) => Some(kind),
        Some(Err(_)) => return bad_request("unknown log kind"),
    };

    let query = LogQuery {
        filter: params.filter,
        kind,
        page: params.page,
        page_size: params.page_size,
    };
    match state.store.list_logs(&query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/wapp/stats
pub async fn get_stats(State(state): State<GatewayState>) -> Response {
    match state.store.dashboard_stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Response for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health, the unauthenticated liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_tolerates_missing_fields() {
        let req: SendRequest = serde_json::from_str("{}").unwrap();
        assert!(req.phone.is_none());
        assert!(req.message.is_none());

        let req: SendRequest =
            serde_json::from_str(r#"{"phone":"0501234567","message":"hi"}"#).unwrap();
        assert_eq!(req.phone.as_deref(), Some("0501234567"));
        assert_eq!(req.message.as_deref(), Some("hi"));
    }

    #[test]
    fn health_response_serializes() {
        let json = serde_json::to_string(&HealthResponse {
            status: "ok",
            version: "0.1.0",
        })
        .unwrap();
        assert!(json.contains("\"status\":\"ok\""));
    }
}
