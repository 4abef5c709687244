// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Green API webhook notification types and inbound-message extraction.
//!
//! Only the `incomingMessageReceived` webhook type carries a message for the
//! bot; everything else (status updates, instance state changes) is ignored
//! by returning `None`.

use serde::Deserialize;
use tracing::debug;

use wappdesk_core::types::{InboundContent, ParsedInbound};

use crate::phone;

/// The only webhook type that is routed into the bot.
pub const INCOMING_MESSAGE_RECEIVED: &str = "incomingMessageReceived";

const TEXT_MESSAGE: &str = "textMessage";
const EXTENDED_TEXT_MESSAGE: &str = "extendedTextMessage";

/// A Green API webhook notification. Fields beyond what the bot consumes are
/// ignored by serde.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub type_webhook: String,
    #[serde(default)]
    pub id_message: Option<String>,
    #[serde(default)]
    pub sender_data: Option<SenderData>,
    #[serde(default)]
    pub message_data: Option<MessageData>,
}

/// Sender identity attached to an incoming-message notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderData {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub sender_contact_name: String,
}

/// Message payload in one of the provider's content shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    #[serde(default)]
    pub type_message: String,
    #[serde(default)]
    pub text_message_data: Option<TextMessageData>,
    #[serde(default)]
    pub extended_text_message_data: Option<ExtendedTextMessageData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessageData {
    #[serde(default)]
    pub text_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessageData {
    #[serde(default)]
    pub text: String,
}

/// Validate a notification and extract the inbound message, if any.
///
/// Returns `None` for non-incoming webhook types and for notifications
/// missing sender or message data; both are acknowledged no-ops upstream.
/// Non-text content comes back as [`InboundContent::Unsupported`] carrying
/// the provider's type tag.
pub fn parse_inbound(notification: &Notification) -> Option<ParsedInbound> {
    if notification.type_webhook != INCOMING_MESSAGE_RECEIVED {
        debug!(type_webhook = %notification.type_webhook, "ignoring webhook type");
        return None;
    }

    let sender = notification.sender_data.as_ref()?;
    let message = notification.message_data.as_ref()?;

    let chat_id = if !sender.chat_id.is_empty() {
        &sender.chat_id
    } else if !sender.sender.is_empty() {
        &sender.sender
    } else {
        debug!("incoming message without chat id or sender");
        return None;
    };
    let phone = phone::from_chat_address(chat_id);

    let sender_name = if !sender.sender_name.is_empty() {
        sender.sender_name.clone()
    } else {
        sender.sender_contact_name.clone()
    };

    let content = match message.type_message.as_str() {
        TEXT_MESSAGE => match &message.text_message_data {
            Some(data) => InboundContent::Text(data.text_message.clone()),
            None => InboundContent::Unsupported(message.type_message.clone()),
        },
        EXTENDED_TEXT_MESSAGE => match &message.extended_text_message_data {
            Some(data) => InboundContent::Text(data.text.clone()),
            None => InboundContent::Unsupported(message.type_message.clone()),
        },
        other => {
            debug!(type_message = %other, "unsupported message type");
            InboundContent::Unsupported(other.to_string())
        }
    };

    Some(ParsedInbound {
        phone,
        sender_name,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_notification(chat_id: &str, sender_name: &str, text: &str) -> Notification {
        serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived",
            "idMessage": "ABCD1234",
            "senderData": {
                "chatId": chat_id,
                "sender": chat_id,
                "senderName": sender_name,
                "senderContactName": ""
            },
            "messageData": {
                "typeMessage": "textMessage",
                "textMessageData": { "textMessage": text }
            }
        }))
        .unwrap()
    }

    #[test]
    fn parses_plain_text_message() {
        let n = text_notification("972501234567@c.us", "Dana", "1");
        let parsed = parse_inbound(&n).unwrap();
        assert_eq!(parsed.phone, "0501234567");
        assert_eq!(parsed.sender_name, "Dana");
        assert_eq!(parsed.content, InboundContent::Text("1".into()));
    }

    #[test]
    fn parses_extended_text_message() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": { "chatId": "972501234567@c.us" },
            "messageData": {
                "typeMessage": "extendedTextMessage",
                "extendedTextMessageData": { "text": "שלום", "stanzaId": "xyz" }
            }
        }))
        .unwrap();
        let parsed = parse_inbound(&n).unwrap();
        assert_eq!(parsed.content, InboundContent::Text("שלום".into()));
    }

    #[test]
    fn non_incoming_webhook_types_are_ignored() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "outgoingMessageStatus",
            "senderData": { "chatId": "972501234567@c.us" },
            "messageData": { "typeMessage": "textMessage" }
        }))
        .unwrap();
        assert!(parse_inbound(&n).is_none());
    }

    #[test]
    fn missing_sender_or_message_data_is_ignored() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived"
        }))
        .unwrap();
        assert!(parse_inbound(&n).is_none());
    }

    #[test]
    fn falls_back_to_sender_when_chat_id_missing() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": { "sender": "972501234567@c.us" },
            "messageData": {
                "typeMessage": "textMessage",
                "textMessageData": { "textMessage": "hi" }
            }
        }))
        .unwrap();
        assert_eq!(parse_inbound(&n).unwrap().phone, "0501234567");
    }

    #[test]
    fn falls_back_to_contact_name() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": {
                "chatId": "972501234567@c.us",
                "senderContactName": "דנה מהעבודה"
            },
            "messageData": {
                "typeMessage": "textMessage",
                "textMessageData": { "textMessage": "hi" }
            }
        }))
        .unwrap();
        assert_eq!(parse_inbound(&n).unwrap().sender_name, "דנה מהעבודה");
    }

    #[test]
    fn image_message_becomes_placeholder() {
        let n: Notification = serde_json::from_value(serde_json::json!({
            "typeWebhook": "incomingMessageReceived",
            "senderData": { "chatId": "972501234567@c.us" },
            "messageData": {
                "typeMessage": "imageMessage",
                "fileMessageData": { "downloadUrl": "https://x", "fileName": "a.jpg" }
            }
        }))
        .unwrap();
        let parsed = parse_inbound(&n).unwrap();
        assert_eq!(
            parsed.content,
            InboundContent::Unsupported("imageMessage".into())
        );
        assert_eq!(parsed.content.record_text(), "[imageMessage]");
    }
}
