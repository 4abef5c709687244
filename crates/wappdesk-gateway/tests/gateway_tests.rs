// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests for the gateway: auth, webhook idempotence, manual
//! send, and the admin API.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use wappdesk_bot::{BotEngine, ConversationStore};
use wappdesk_config::model::CompanyConfig;
use wappdesk_gateway::{build_router, AuthConfig, GatewayState};
use wappdesk_test_utils::{MemoryStore, RecordingSender};

const KEY: &str = "shared-secret";

struct Harness {
    router: Router,
    store: Arc<MemoryStore>,
    sender: Arc<RecordingSender>,
}

fn harness() -> Harness {
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
        sender: sender.clone(),
        store: store.clone(),
    };
    let router = build_router(
        state,
        AuthConfig {
            key: KEY.to_string(),
        },
    );
    Harness {
        router,
        store,
        sender,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn incoming_text(chat_id: &str, sender_name: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "typeWebhook": "incomingMessageReceived",
        "senderData": {
            "chatId": chat_id,
            "sender": chat_id,
            "senderName": sender_name
        },
        "messageData": {
            "typeMessage": "textMessage",
            "textMessageData": { "textMessage": text }
        }
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn webhook_without_key_is_unauthorized_and_touches_nothing() {
    let h = harness();

    let response = h
        .router
        .clone()
        .oneshot(post_json(
            "/api/wapp/received",
            incoming_text("972501234567@c.us", "Dana", "1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = h
        .router
        .clone()
        .oneshot(post_json(
            "/api/wapp/received?key=wrong",
            incoming_text("972501234567@c.us", "Dana", "1"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Rejected before any state mutation.
    assert!(h.store.messages().is_empty());
    assert!(h.store.logs().is_empty());
    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn incoming_text_is_processed_end_to_end() {
    let h = harness();

    let response = h
        .router
        .clone()
        .oneshot(post_json(
            &format!("/api/wapp/received?key={KEY}"),
            incoming_text("972501234567@c.us", "Dana", "שלום"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Customer auto-created, message recorded, greeting sent.
    assert_eq!(h.store.customers().len(), 1);
    assert_eq!(h.store.customers()[0].name, "Dana");
    assert_eq!(h.store.messages().len(), 1);
    assert_eq!(h.sender.sent_to("0501234567").len(), 1);
}

#[tokio::test]
async fn non_incoming_webhook_redelivery_is_idempotent() {
    let h = harness();

    let notification = serde_json::json!({
        "typeWebhook": "stateInstanceChanged",
        "stateInstance": "authorized"
    });

    for _ in 0..3 {
        let response = h
            .router
            .clone()
            .oneshot(post_json(
                &format!("/api/wapp/received?key={KEY}"),
                notification.clone(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // No state mutation and no log entries, no matter how often redelivered.
    assert!(h.store.messages().is_empty());
    assert!(h.store.logs().is_empty());
    assert!(h.store.customers().is_empty());
    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn unparseable_payload_is_acknowledged() {
    let h = harness();
    let response = h
        .router
        .clone()
        .oneshot(post_json(
            &format!("/api/wapp/received?key={KEY}"),
            serde_json::json!({ "something": "else" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(h.store.messages().is_empty());
}

#[tokio::test]
async fn manual_send_validates_and_sends() {
    let h = harness();

    // Missing message field: 400.
    let response = h
        .router
        .clone()
        .oneshot(post_json(
            &format!("/api/wapp/send?key={KEY}"),
            serde_json::json!({ "phone": "0501234567" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid request: 200 with a provider message id.
    let response = h
        .router
        .clone()
        .oneshot(post_json(
            &format!("/api/wapp/send?key={KEY}"),
            serde_json::json!({ "phone": "0501234567", "message": "בדיקה" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["id_message"].as_str().unwrap().starts_with("mock-"));
    assert_eq!(h.sender.sent_to("0501234567"), vec!["בדיקה".to_string()]);
}

#[tokio::test]
async fn manual_send_failure_is_500() {
    let h = harness();
    h.sender.fail_sends(true);

    let response = h
        .router
        .clone()
        .oneshot(post_json(
            &format!("/api/wapp/send?key={KEY}"),
            serde_json::json!({ "phone": "0501234567", "message": "בדיקה" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn admin_endpoints_return_data() {
    let h = harness();

    // Drive one full conversation through the webhook.
    for text in ["שלום", "1", "1", "רחוב הרצל 10", "מצלמה לא עובדת"] {
        let response = h
            .router
            .clone()
            .oneshot(post_json(
                &format!("/api/wapp/received?key={KEY}"),
                incoming_text("972501234567@c.us", "Dana", text),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = h
        .router
        .clone()
        .oneshot(get(&format!("/api/wapp/messages?key={KEY}&page_size=2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let response = h
        .router
        .clone()
        .oneshot(get(&format!(
            "/api/wapp/logs?key={KEY}&kind=service_call_created"
        )))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);

    let response = h
        .router
        .clone()
        .oneshot(get(&format!("/api/wapp/stats?key={KEY}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["open_service_calls"], 1);
    assert_eq!(body["today_messages"], 5);
    assert_eq!(body["pending_messages"], 0);
}

#[tokio::test]
async fn admin_list_rejects_unknown_enum_values() {
    let h = harness();
    let response = h
        .router
        .clone()
        .oneshot(get(&format!("/api/wapp/messages?key={KEY}&status=bogus")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_public() {
    let h = harness();
    let response = h.router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
