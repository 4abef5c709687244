// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Wappdesk workspace.
//!
//! Durable entities (customers, service calls, message records, log entries)
//! use string UUID ids and RFC 3339 UTC timestamps. Enumerations are closed
//! Rust enums whose snake_case string form (via strum) is the value stored in
//! the database, with Hebrew captions used only in outbound message text.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Provider-assigned identifier of a delivered outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Current UTC timestamp in the millisecond RFC 3339 form stored in the database.
///
/// Matches SQLite's `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')` so string
/// comparison orders chronologically.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Fresh random entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// --- Enumerations ---

/// Kind of service requested in a service call.
///
/// Each variant carries the menu key a WhatsApp user types to select it and
/// the Hebrew caption shown in outbound messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceCallType {
    Cameras,
    Chains,
    Safety,
    Maintenance,
    Other,
}

impl ServiceCallType {
    /// All types in menu order.
    pub const ALL: [Self; 5] = [
        Self::Cameras,
        Self::Chains,
        Self::Safety,
        Self::Maintenance,
        Self::Other,
    ];

    /// Menu key -> service type, as presented in the service-type menu.
    pub fn from_menu_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Self::Cameras),
            "2" => Some(Self::Chains),
            "3" => Some(Self::Safety),
            "4" => Some(Self::Maintenance),
            "5" => Some(Self::Other),
            _ => None,
        }
    }

    /// The key a user types to select this type.
    pub fn menu_key(&self) -> &'static str {
        match self {
            Self::Cameras => "1",
            Self::Chains => "2",
            Self::Safety => "3",
            Self::Maintenance => "4",
            Self::Other => "5",
        }
    }

    /// Hebrew caption used in outbound message text.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Cameras => "מצלמות לעגורנים",
            Self::Chains => "שרשראות הרמה",
            Self::Safety => "ציוד בטיחות",
            Self::Maintenance => "תחזוקה שוטפת",
            Self::Other => "אחר",
        }
    }
}

/// Lifecycle status of a service call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceCallStatus {
    Open,
    InProgress,
    Closed,
    Cancelled,
}

impl ServiceCallStatus {
    /// Hebrew caption used in outbound message text.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Open => "פתוח",
            Self::InProgress => "בטיפול",
            Self::Closed => "סגור",
            Self::Cancelled => "בוטל",
        }
    }
}

/// Direction of a recorded WhatsApp message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Processing status of a recorded WhatsApp message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Processed,
    Failed,
}

/// Kind of an append-only log event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    MessageReceived,
    MessageSent,
    ServiceCallCreated,
    CustomerIdentified,
    CustomerNotFound,
    BotError,
    SessionStarted,
    SessionEnded,
}

// --- Durable entities ---

/// A customer record, auto-created on first contact when no phone match exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub created_at: String,
}

impl Customer {
    /// New customer with the given name and mobile, empty email/address.
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            mobile: mobile.into(),
            email: String::new(),
            address: String::new(),
            created_at: now_rfc3339(),
        }
    }
}

/// A service-call work order.
///
/// `call_number` is assigned by the persistence layer, never by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub id: String,
    pub call_number: i64,
    pub customer_id: String,
    pub address: String,
    pub site: String,
    pub description: String,
    pub contact_name: String,
    pub contact_mobile: String,
    pub service_type: ServiceCallType,
    pub status: ServiceCallStatus,
    pub last_update_at: String,
    pub created_at: String,
}

/// Fields the bot supplies when opening a service call; the store fills in
/// id, call number, status (open), and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCallDraft {
    pub customer_id: String,
    pub service_type: ServiceCallType,
    pub address: String,
    pub description: String,
    pub contact_name: String,
    pub contact_mobile: String,
}

/// Durable record of one inbound or outbound WhatsApp text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppMessage {
    pub id: String,
    pub phone: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub text: String,
    pub direction: MessageDirection,
    pub status: MessageStatus,
    pub related_service_call_id: Option<String>,
    pub created_at: String,
}

impl WhatsAppMessage {
    /// New pending incoming message, optionally attributed to a customer.
    pub fn incoming(
        phone: impl Into<String>,
        text: impl Into<String>,
        customer: Option<&Customer>,
    ) -> Self {
        Self {
            id: new_id(),
            phone: phone.into(),
            customer_id: customer.map(|c| c.id.clone()),
            customer_name: customer.map(|c| c.name.clone()),
            text: text.into(),
            direction: MessageDirection::Incoming,
            status: MessageStatus::Pending,
            related_service_call_id: None,
            created_at: now_rfc3339(),
        }
    }
}

/// Append-only log event; immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppLog {
    pub id: String,
    pub phone: String,
    pub customer_id: Option<String>,
    pub kind: LogKind,
    pub details: String,
    pub related_message_id: Option<String>,
    pub related_service_call_id: Option<String>,
    pub created_at: String,
}

impl WhatsAppLog {
    /// New log event for the given phone.
    pub fn event(kind: LogKind, phone: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            phone: phone.into(),
            customer_id: None,
            kind,
            details: details.into(),
            related_message_id: None,
            related_service_call_id: None,
            created_at: now_rfc3339(),
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_message(mut self, message_id: impl Into<String>) -> Self {
        self.related_message_id = Some(message_id.into());
        self
    }

    pub fn with_service_call(mut self, service_call_id: impl Into<String>) -> Self {
        self.related_service_call_id = Some(service_call_id.into());
        self
    }
}

// --- Inbound notification types ---

/// Content extracted from an inbound gateway notification.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundContent {
    /// Genuine text (plain or extended), routed into the state machine.
    Text(String),
    /// Any other content type, carrying the provider's type tag. Recorded
    /// as a bracketed placeholder and never routed into the state machine.
    Unsupported(String),
}

impl InboundContent {
    /// The text for genuine text content, `None` otherwise.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::Unsupported(_) => None,
        }
    }

    /// The form stored in the message record: the text itself, or a
    /// bracketed placeholder tag like `[imageMessage]`.
    pub fn record_text(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            Self::Unsupported(tag) => format!("[{tag}]"),
        }
    }
}

/// A validated inbound message extracted from a webhook notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInbound {
    /// Local-form phone number (e.g. "0501234567").
    pub phone: String,
    /// Sender display name as reported by the gateway; may be empty.
    pub sender_name: String,
    pub content: InboundContent,
}

// --- Admin query/response types ---

/// One page of query results plus the unpaged total.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Filter and paging parameters for the message list.
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Substring match against phone, customer name, or message text.
    pub filter: Option<String>,
    pub status: Option<MessageStatus>,
    pub direction: Option<MessageDirection>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Filter and paging parameters for the log list.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Substring match against phone or details.
    pub filter: Option<String>,
    pub kind: Option<LogKind>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Dashboard counters for the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending_messages: i64,
    pub open_service_calls: i64,
    pub today_messages: i64,
    pub today_service_calls: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn service_type_menu_key_round_trips() {
        for key in ["1", "2", "3", "4", "5"] {
            let ty = ServiceCallType::from_menu_key(key).expect("known key");
            assert_eq!(ty.menu_key(), key);
        }
        assert_eq!(ServiceCallType::from_menu_key("6"), None);
        assert_eq!(ServiceCallType::from_menu_key(""), None);
        assert_eq!(ServiceCallType::from_menu_key("1 "), None);
    }

    #[test]
    fn enums_store_as_snake_case() {
        assert_eq!(ServiceCallStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            ServiceCallStatus::from_str("in_progress").unwrap(),
            ServiceCallStatus::InProgress
        );
        assert_eq!(LogKind::ServiceCallCreated.to_string(), "service_call_created");
        assert_eq!(MessageStatus::Pending.to_string(), "pending");
        assert_eq!(MessageDirection::Incoming.to_string(), "incoming");
    }

    #[test]
    fn unsupported_content_records_as_placeholder() {
        let content = InboundContent::Unsupported("imageMessage".into());
        assert_eq!(content.record_text(), "[imageMessage]");
        assert!(content.as_text().is_none());
    }

    #[test]
    fn incoming_message_starts_pending() {
        let customer = Customer::new("דנה", "0501234567");
        let msg = WhatsAppMessage::incoming("0501234567", "שלום", Some(&customer));
        assert_eq!(msg.status, MessageStatus::Pending);
        assert_eq!(msg.direction, MessageDirection::Incoming);
        assert_eq!(msg.customer_id.as_deref(), Some(customer.id.as_str()));
        assert_eq!(msg.customer_name.as_deref(), Some("דנה"));
    }

    #[test]
    fn log_builder_attaches_correlations() {
        let log = WhatsAppLog::event(LogKind::MessageReceived, "0501234567", "details")
            .with_customer("c-1")
            .with_message("m-1")
            .with_service_call("s-1");
        assert_eq!(log.customer_id.as_deref(), Some("c-1"));
        assert_eq!(log.related_message_id.as_deref(), Some("m-1"));
        assert_eq!(log.related_service_call_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn now_rfc3339_is_sortable_utc() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }
}
