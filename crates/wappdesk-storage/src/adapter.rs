// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DeskStore trait.

use async_trait::async_trait;
use tracing::debug;

use wappdesk_config::model::StorageConfig;
use wappdesk_core::types::{
    Customer, DashboardStats, LogQuery, MessageQuery, MessageStatus, Page, ServiceCall,
    ServiceCallDraft, WhatsAppLog, WhatsAppMessage,
};
use wappdesk_core::{DeskStore, WappdeskError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all operations to the typed
/// query modules. All writes go through the single tokio-rusqlite background
/// thread, which eliminates SQLITE_BUSY under concurrent access.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Wrap an already-opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database at `path` (running migrations) and wrap it.
    pub async fn open(path: &str) -> Result<Self, WappdeskError> {
        let db = Database::open(path).await?;
        debug!(path, "SQLite store initialized");
        Ok(Self::new(db))
    }

    /// Open the database at the configured path.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, WappdeskError> {
        Self::open(&config.database_path).await
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), WappdeskError> {
        self.db.close().await
    }
}

#[async_trait]
impl DeskStore for SqliteStore {
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, WappdeskError> {
        queries::customers::find_by_phone(&self.db, phone).await
    }

    async fn create_customer(&self, customer: &Customer) -> Result<(), WappdeskError> {
        queries::customers::insert_customer(&self.db, customer).await
    }

    async fn open_service_calls(
        &self,
        customer_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ServiceCall>, WappdeskError> {
        queries::service_calls::open_for_customer(&self.db, customer_id, limit).await
    }

    async fn create_service_call(
        &self,
        draft: &ServiceCallDraft,
    ) -> Result<ServiceCall, WappdeskError> {
        queries::service_calls::create_from_draft(&self.db, draft).await
    }

    async fn record_message(&self, message: &WhatsAppMessage) -> Result<(), WappdeskError> {
        queries::messages::insert_message(&self.db, message).await
    }

    async fn update_message_status(
        &self,
        id: &str,
        status: MessageStatus,
    ) -> Result<(), WappdeskError> {
        queries::messages::update_status(&self.db, id, status).await
    }

    async fn append_log(&self, entry: &WhatsAppLog) -> Result<(), WappdeskError> {
        queries::logs::insert_log(&self.db, entry).await
    }

    async fn list_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<Page<WhatsAppMessage>, WappdeskError> {
        queries::messages::list_messages(&self.db, query).await
    }

    async fn list_logs(&self, query: &LogQuery) -> Result<Page<WhatsAppLog>, WappdeskError> {
        queries::logs::list_logs(&self.db, query).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, WappdeskError> {
        queries::stats::dashboard_stats(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wappdesk_core::types::{LogKind, ServiceCallStatus, ServiceCallType};

    async fn open_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn full_service_call_lifecycle_through_trait() {
        let (store, _dir) = open_store().await;
        let store: &dyn DeskStore = &store;

        assert!(store
            .find_customer_by_phone("0501234567")
            .await
            .unwrap()
            .is_none());

        let customer = Customer::new("דנה", "0501234567");
        store.create_customer(&customer).await.unwrap();
        let found = store
            .find_customer_by_phone("0501234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, customer.id);

        let call = store
            .create_service_call(&ServiceCallDraft {
                customer_id: customer.id.clone(),
                service_type: ServiceCallType::Chains,
                address: "נמל אשדוד".to_string(),
                description: "שרשרת שחוקה".to_string(),
                contact_name: customer.name.clone(),
                contact_mobile: customer.mobile.clone(),
            })
            .await
            .unwrap();
        assert_eq!(call.call_number, 1001);
        assert_eq!(call.status, ServiceCallStatus::Open);

        let open = store.open_service_calls(&customer.id, None).await.unwrap();
        assert_eq!(open.len(), 1);
    }

    #[tokio::test]
    async fn message_and_log_round_trip_through_trait() {
        let (store, _dir) = open_store().await;

        let msg = WhatsAppMessage::incoming("0501234567", "שלום", None);
        store.record_message(&msg).await.unwrap();
        store
            .update_message_status(&msg.id, MessageStatus::Processed)
            .await
            .unwrap();

        store
            .append_log(
                &WhatsAppLog::event(LogKind::MessageReceived, "0501234567", "הודעה התקבלה")
                    .with_message(&msg.id),
            )
            .await
            .unwrap();

        let messages = store.list_messages(&MessageQuery::default()).await.unwrap();
        assert_eq!(messages.total, 1);
        assert_eq!(messages.items[0].status, MessageStatus::Processed);

        let logs = store.list_logs(&LogQuery::default()).await.unwrap();
        assert_eq!(logs.total, 1);
        assert_eq!(logs.items[0].related_message_id.as_deref(), Some(msg.id.as_str()));

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.pending_messages, 0);
        assert_eq!(stats.today_messages, 1);
    }

    #[tokio::test]
    async fn concurrent_writers_no_sqlite_busy() {
        let (store, _dir) = open_store().await;
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let msg = WhatsAppMessage::incoming(format!("05000000{i:02}"), "hi", None);
                store.record_message(&msg).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let page = store.list_messages(&MessageQuery::default()).await.unwrap();
        assert_eq!(page.total, 10);
    }
}
