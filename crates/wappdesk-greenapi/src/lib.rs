// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Green API WhatsApp gateway client for the Wappdesk service-desk bot.
//!
//! Implements [`OutboundSender`] against the Green API `sendMessage`
//! endpoint, plus phone canonicalization and webhook notification parsing.
//! Sends are single-attempt: a failure is logged as a bot error and reported
//! to the caller, never retried here.

pub mod notification;
pub mod phone;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use wappdesk_config::model::GreenApiConfig;
use wappdesk_core::types::{LogKind, WhatsAppLog};
use wappdesk_core::{EventLog, MessageId, OutboundSender, WappdeskError};

/// Log previews keep at most this many characters of the message body.
const LOG_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest {
    chat_id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageResponse {
    id_message: String,
}

/// Green API client implementing [`OutboundSender`].
pub struct GreenApiClient {
    http: reqwest::Client,
    base_url: String,
    instance_id: String,
    token: String,
    log: EventLog,
}

impl GreenApiClient {
    /// Creates a new client.
    ///
    /// Requires `instance_id` and `token` to be configured; the HTTP client
    /// applies the configured bounded request timeout.
    pub fn new(config: &GreenApiConfig, log: EventLog) -> Result<Self, WappdeskError> {
        if config.instance_id.is_empty() || config.token.is_empty() {
            return Err(WappdeskError::Config(
                "greenapi.instance_id and greenapi.token are required for sending".into(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.send_timeout_secs))
            .build()
            .map_err(|e| WappdeskError::Gateway {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            instance_id: config.instance_id.clone(),
            token: config.token.clone(),
            log,
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/waInstance{}/sendMessage/{}",
            self.base_url, self.instance_id, self.token
        )
    }

    async fn log_send_failure(&self, phone: &str, detail: &str) {
        self.log
            .record(WhatsAppLog::event(
                LogKind::BotError,
                phone,
                format!("שגיאה בשליחת הודעה: {detail}"),
            ))
            .await;
    }
}

/// Char-boundary-safe preview of a message body for log entries.
fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[async_trait]
impl OutboundSender for GreenApiClient {
    async fn send_text(&self, phone: &str, text: &str) -> Result<MessageId, WappdeskError> {
        let chat_id = phone::to_chat_address(phone);
        let request = SendMessageRequest {
            chat_id,
            message: text.to_string(),
        };

        let response = match self.http.post(self.send_url()).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(phone, error = %e, "send request failed");
                self.log_send_failure(phone, &e.to_string()).await;
                return Err(WappdeskError::Gateway {
                    message: format!("send request failed: {e}"),
                    source: Some(Box::new(e)),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(phone, %status, "send rejected by gateway");
            self.log_send_failure(phone, &format!("HTTP {status}")).await;
            return Err(WappdeskError::Gateway {
                message: format!("send rejected with status {status}"),
                source: None,
            });
        }

        let parsed: SendMessageResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(phone, error = %e, "malformed send response");
                self.log_send_failure(phone, &e.to_string()).await;
                return Err(WappdeskError::Gateway {
                    message: format!("malformed send response: {e}"),
                    source: Some(Box::new(e)),
                });
            }
        };

        debug!(phone, id_message = %parsed.id_message, "message sent");
        self.log
            .record(WhatsAppLog::event(
                LogKind::MessageSent,
                phone,
                format!("הודעה נשלחה: {}", preview(text)),
            ))
            .await;

        Ok(MessageId(parsed.id_message))
    }
}
