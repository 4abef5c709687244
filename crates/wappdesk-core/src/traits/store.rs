// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence abstraction for the durable domain entities.

use async_trait::async_trait;

use crate::error::WappdeskError;
use crate::types::{
    Customer, DashboardStats, LogQuery, MessageQuery, MessageStatus, Page, ServiceCall,
    ServiceCallDraft, WhatsAppLog, WhatsAppMessage,
};

/// Repository abstraction over the durable entities the bot touches.
///
/// The bot core holds no long-lived entity references, only ids; all reads
/// and writes go through this trait so the conversation engine can be tested
/// against an in-memory implementation.
#[async_trait]
pub trait DeskStore: Send + Sync {
    // --- Customers ---

    /// Look up a customer by local-form mobile phone.
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, WappdeskError>;

    /// Insert a new customer record.
    async fn create_customer(&self, customer: &Customer) -> Result<(), WappdeskError>;

    // --- Service calls ---

    /// Open or in-progress service calls for a customer, newest first.
    async fn open_service_calls(
        &self,
        customer_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ServiceCall>, WappdeskError>;

    /// Create a service call from the draft. The store assigns the id, the
    /// monotonically increasing call number, the open status, and timestamps,
    /// and returns the stored record.
    async fn create_service_call(
        &self,
        draft: &ServiceCallDraft,
    ) -> Result<ServiceCall, WappdeskError>;

    // --- Message records ---

    /// Insert a message record (inbound messages start pending).
    async fn record_message(&self, message: &WhatsAppMessage) -> Result<(), WappdeskError>;

    /// Flip a message record's processing status.
    async fn update_message_status(
        &self,
        id: &str,
        status: MessageStatus,
    ) -> Result<(), WappdeskError>;

    // --- Event log ---

    /// Append one immutable log event. There is deliberately no update or
    /// delete counterpart.
    async fn append_log(&self, entry: &WhatsAppLog) -> Result<(), WappdeskError>;

    // --- Admin queries ---

    /// Paged message list with optional filter/status/direction.
    async fn list_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<Page<WhatsAppMessage>, WappdeskError>;

    /// Paged log list with optional filter/kind.
    async fn list_logs(&self, query: &LogQuery) -> Result<Page<WhatsAppLog>, WappdeskError>;

    /// Dashboard counters.
    async fn dashboard_stats(&self) -> Result<DashboardStats, WappdeskError>;
}
