// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `DeskStore` for deterministic testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wappdesk_core::types::{
    new_id, now_rfc3339, Customer, DashboardStats, LogQuery, MessageQuery, MessageStatus, Page,
    ServiceCall, ServiceCallDraft, ServiceCallStatus, WhatsAppLog, WhatsAppMessage,
};
use wappdesk_core::{DeskStore, WappdeskError};

const FIRST_CALL_NUMBER: i64 = 1001;

#[derive(Default)]
struct Inner {
    customers: Vec<Customer>,
    service_calls: Vec<ServiceCall>,
    messages: Vec<WhatsAppMessage>,
    logs: Vec<WhatsAppLog>,
}

/// An in-memory store with assertion accessors and injectable failures.
///
/// Call numbers are assigned from 1001 upward, mirroring the SQLite store's
/// seeded sequence.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_customers: AtomicBool,
    fail_service_calls: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create_customer` fail.
    pub fn fail_customers(&self, fail: bool) {
        self.fail_customers.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `create_service_call` fail.
    pub fn fail_service_calls(&self, fail: bool) {
        self.fail_service_calls.store(fail, Ordering::SeqCst);
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.inner.lock().unwrap().customers.clone()
    }

    pub fn service_calls(&self) -> Vec<ServiceCall> {
        self.inner.lock().unwrap().service_calls.clone()
    }

    pub fn messages(&self) -> Vec<WhatsAppMessage> {
        self.inner.lock().unwrap().messages.clone()
    }

    pub fn logs(&self) -> Vec<WhatsAppLog> {
        self.inner.lock().unwrap().logs.clone()
    }

    /// Seed an existing customer.
    pub fn insert_customer(&self, customer: Customer) {
        self.inner.lock().unwrap().customers.push(customer);
    }

    /// Seed an existing service call (e.g. an already-open one).
    pub fn insert_service_call(&self, call: ServiceCall) {
        self.inner.lock().unwrap().service_calls.push(call);
    }

    fn storage_error(what: &str) -> WappdeskError {
        WappdeskError::Storage {
            source: format!("injected {what} failure").into(),
        }
    }
}

#[async_trait]
impl DeskStore for MemoryStore {
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, WappdeskError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.customers.iter().find(|c| c.mobile == phone).cloned())
    }

    async fn create_customer(&self, customer: &Customer) -> Result<(), WappdeskError> {
        if self.fail_customers.load(Ordering::SeqCst) {
            return Err(Self::storage_error("customer"));
        }
        self.inner.lock().unwrap().customers.push(customer.clone());
        Ok(())
    }

    async fn open_service_calls(
        &self,
        customer_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ServiceCall>, WappdeskError> {
        let inner = self.inner.lock().unwrap();
        let mut calls: Vec<ServiceCall> = inner
            .service_calls
            .iter()
            .filter(|c| {
                c.customer_id == customer_id
                    && matches!(
                        c.status,
                        ServiceCallStatus::Open | ServiceCallStatus::InProgress
                    )
            })
            .cloned()
            .collect();
        calls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            calls.truncate(limit.max(0) as usize);
        }
        Ok(calls)
    }

    async fn create_service_call(
        &self,
        draft: &ServiceCallDraft,
    ) -> Result<ServiceCall, WappdeskError> {
        if self.fail_service_calls.load(Ordering::SeqCst) {
            return Err(Self::storage_error("service call"));
        }
        let mut inner = self.inner.lock().unwrap();
        let call_number = inner
            .service_calls
            .iter()
            .map(|c| c.call_number)
            .max()
            .map_or(FIRST_CALL_NUMBER, |n| n + 1);
        let now = now_rfc3339();
        let call = ServiceCall {
            id: new_id(),
            call_number,
            customer_id: draft.customer_id.clone(),
            address: draft.address.clone(),
            site: String::new(),
            description: draft.description.clone(),
            contact_name: draft.contact_name.clone(),
            contact_mobile: draft.contact_mobile.clone(),
            service_type: draft.service_type,
            status: ServiceCallStatus::Open,
            last_update_at: now.clone(),
            created_at: now,
        };
        inner.service_calls.push(call.clone());
        Ok(call)
    }

    async fn record_message(&self, message: &WhatsAppMessage) -> Result<(), WappdeskError> {
        self.inner.lock().unwrap().messages.push(message.clone());
        Ok(())
    }

    async fn update_message_status(
        &self,
        id: &str,
        status: MessageStatus,
    ) -> Result<(), WappdeskError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(msg) = inner.messages.iter_mut().find(|m| m.id == id) {
            msg.status = status;
        }
        Ok(())
    }

    async fn append_log(&self, entry: &WhatsAppLog) -> Result<(), WappdeskError> {
        self.inner.lock().unwrap().logs.push(entry.clone());
        Ok(())
    }

    async fn list_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<Page<WhatsAppMessage>, WappdeskError> {
        let inner = self.inner.lock().unwrap();
        let mut items: Vec<WhatsAppMessage> = inner
            .messages
            .iter()
            .filter(|m| {
                query.filter.as_deref().is_none_or(|f| {
                    m.phone.contains(f)
                        || m.customer_name.as_deref().is_some_and(|n| n.contains(f))
                        || m.text.contains(f)
                }) && query.status.is_none_or(|s| m.status == s)
                    && query.direction.is_none_or(|d| m.direction == d)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = items.len() as i64;
        let page_size = query.page_size.unwrap_or(50).max(1) as usize;
        let page = query.page.unwrap_or(1).max(1) as usize;
        let items = items
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();
        Ok(Page { items, total })
    }

    async fn list_logs(&self, query: &LogQuery) -> Result<Page<WhatsAppLog>, WappdeskError> {
        let inner = self.inner.lock().unwrap();
        let mut items: Vec<WhatsAppLog> = inner
            .logs
            .iter()
            .filter(|l| {
                query
                    .filter
                    .as_deref()
                    .is_none_or(|f| l.phone.contains(f) || l.details.contains(f))
                    && query.kind.is_none_or(|k| l.kind == k)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = items.len() as i64;
        let page_size = query.page_size.unwrap_or(100).max(1) as usize;
        let page = query.page.unwrap_or(1).max(1) as usize;
        let items = items
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();
        Ok(Page { items, total })
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, WappdeskError> {
        let inner = self.inner.lock().unwrap();
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        Ok(DashboardStats {
            pending_messages: inner
                .messages
                .iter()
                .filter(|m| m.status == MessageStatus::Pending)
                .count() as i64,
            open_service_calls: inner
                .service_calls
                .iter()
                .filter(|c| {
                    matches!(
                        c.status,
                        ServiceCallStatus::Open | ServiceCallStatus::InProgress
                    )
                })
                .count() as i64,
            today_messages: inner
                .messages
                .iter()
                .filter(|m| m.created_at.starts_with(&today))
                .count() as i64,
            today_service_calls: inner
                .service_calls
                .iter()
                .filter(|c| c.created_at.starts_with(&today))
                .count() as i64,
        })
    }
}
