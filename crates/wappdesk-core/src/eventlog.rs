// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only event logger over the persistence abstraction.
//!
//! Every component records its durable audit trail through [`EventLog`].
//! A failed append must never fail the operation being logged, so errors
//! are traced and swallowed here.

use std::sync::Arc;

use tracing::warn;

use crate::traits::DeskStore;
use crate::types::WhatsAppLog;

/// Writes immutable [`WhatsAppLog`] events, swallowing persistence failures.
#[derive(Clone)]
pub struct EventLog {
    store: Arc<dyn DeskStore>,
}

impl EventLog {
    pub fn new(store: Arc<dyn DeskStore>) -> Self {
        Self { store }
    }

    /// Append one event. Persistence failures are logged and dropped.
    pub async fn record(&self, entry: WhatsAppLog) {
        if let Err(e) = self.store.append_log(&entry).await {
            warn!(kind = %entry.kind, phone = %entry.phone, error = %e, "failed to append log event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WappdeskError;
    use crate::types::{
        Customer, DashboardStats, LogKind, LogQuery, MessageQuery, MessageStatus, Page,
        ServiceCall, ServiceCallDraft, WhatsAppMessage,
    };
    use async_trait::async_trait;

    /// A store whose log append always fails.
    struct BrokenStore;

    #[async_trait]
    impl DeskStore for BrokenStore {
        async fn find_customer_by_phone(
            &self,
            _phone: &str,
        ) -> Result<Option<Customer>, WappdeskError> {
            unimplemented!()
        }
        async fn create_customer(&self, _customer: &Customer) -> Result<(), WappdeskError> {
            unimplemented!()
        }
        async fn open_service_calls(
            &self,
            _customer_id: &str,
            _limit: Option<i64>,
        ) -> Result<Vec<ServiceCall>, WappdeskError> {
            unimplemented!()
        }
        async fn create_service_call(
            &self,
            _draft: &ServiceCallDraft,
        ) -> Result<ServiceCall, WappdeskError> {
            unimplemented!()
        }
        async fn record_message(&self, _message: &WhatsAppMessage) -> Result<(), WappdeskError> {
            unimplemented!()
        }
        async fn update_message_status(
            &self,
            _id: &str,
            _status: MessageStatus,
        ) -> Result<(), WappdeskError> {
            unimplemented!()
        }
        async fn append_log(&self, _entry: &WhatsAppLog) -> Result<(), WappdeskError> {
            Err(WappdeskError::Storage {
                source: "disk full".into(),
            })
        }
        async fn list_messages(
            &self,
            _query: &MessageQuery,
        ) -> Result<Page<WhatsAppMessage>, WappdeskError> {
            unimplemented!()
        }
        async fn list_logs(&self, _query: &LogQuery) -> Result<Page<WhatsAppLog>, WappdeskError> {
            unimplemented!()
        }
        async fn dashboard_stats(&self) -> Result<DashboardStats, WappdeskError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn append_failure_never_propagates() {
        let log = EventLog::new(Arc::new(BrokenStore));
        // Must not panic or surface the storage error.
        log.record(WhatsAppLog::event(
            LogKind::MessageReceived,
            "0501234567",
            "הודעה התקבלה",
        ))
        .await;
    }
}
