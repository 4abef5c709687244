// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording `OutboundSender` for deterministic testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use wappdesk_core::{MessageId, OutboundSender, WappdeskError};

/// One captured outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub phone: String,
    pub text: String,
}

/// An `OutboundSender` that records every send for assertion.
///
/// Supports an optional artificial delay (to widen race windows in
/// concurrency tests) and injectable failures.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentMessage>>,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Sleep this long inside each send (while any per-phone lock is held).
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    /// All captured sends, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Captured message texts for one phone, in order.
    pub fn sent_to(&self, phone: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.phone == phone)
            .map(|m| m.text.clone())
            .collect()
    }
}

#[async_trait]
impl OutboundSender for RecordingSender {
    async fn send_text(&self, phone: &str, text: &str) -> Result<MessageId, WappdeskError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(WappdeskError::Gateway {
                message: "injected send failure".into(),
                source: None,
            });
        }
        self.sent.lock().unwrap().push(SentMessage {
            phone: phone.to_string(),
            text: text.to_string(),
        });
        Ok(MessageId(format!("mock-{}", uuid::Uuid::new_v4())))
    }
}
