// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message delivery seam.

use async_trait::async_trait;

use crate::error::WappdeskError;
use crate::types::MessageId;

/// Sends one outbound text to a phone number via the messaging gateway.
///
/// One attempt, best effort: failures are reported to the caller and logged,
/// never retried automatically.
#[async_trait]
pub trait OutboundSender: Send + Sync {
    /// Send `text` to `phone` (local form). Returns the provider message id.
    async fn send_text(&self, phone: &str, text: &str) -> Result<MessageId, WappdeskError>;
}
