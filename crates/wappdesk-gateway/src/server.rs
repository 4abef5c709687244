// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the webhook ingress and
//! the admin API.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use wappdesk_bot::BotEngine;
use wappdesk_config::model::WebhookConfig;
use wappdesk_core::{DeskStore, OutboundSender, WappdeskError};

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Conversation engine driving inbound messages.
    pub engine: Arc<BotEngine>,
    /// Outbound sender for the manual-send endpoint.
    pub sender: Arc<dyn OutboundSender>,
    /// Store backing the admin endpoints.
    pub store: Arc<dyn DeskStore>,
}

/// Build the full gateway router.
///
/// Routes:
/// - `GET /health` (unauthenticated liveness)
/// - `POST /api/wapp/received` (Green API webhook, key-authenticated)
/// - `POST /api/wapp/send` (manual send, key-authenticated)
/// - `GET /api/wapp/messages`, `/api/wapp/logs`, `/api/wapp/stats`
///   (admin API, key-authenticated)
pub fn build_router(state: GatewayState, auth: AuthConfig) -> Router {
    let public_routes = Router::new().route("/health", get(handlers::get_health));

    let api_routes = Router::new()
        .route("/api/wapp/received", post(handlers::post_received))
        .route("/api/wapp/send", post(handlers::post_send))
        .route("/api/wapp/messages", get(handlers::get_messages))
        .route("/api/wapp/logs", get(handlers::get_logs))
        .route("/api/wapp/stats", get(handlers::get_stats))
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway server and serve until `shutdown` resolves.
pub async fn start_server(
    config: &WebhookConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), WappdeskError> {
    let auth = AuthConfig {
        key: config.key.clone(),
    };
    let app = build_router(state, auth);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WappdeskError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| WappdeskError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wappdesk_bot::ConversationStore;
    use wappdesk_config::model::CompanyConfig;
    use wappdesk_test_utils::{MemoryStore, RecordingSender};

    #[test]
    fn gateway_state_is_clone() {
        let store = Arc::new(MemoryStore::new());
        let sender = Arc::new(RecordingSender::new());
        let conversations = ConversationStore::new(Duration::from_secs(30 * 60));
        let engine = Arc::new(BotEngine::new(
            store.clone(),
            sender.clone(),
            conversations,
            CompanyConfig::default(),
        ));
        let state = GatewayState {
            engine,
            sender,
            store,
        };
        let _cloned = state.clone();
    }
}
