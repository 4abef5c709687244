// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer resolution by canonical phone.
//!
//! Resolution is driven by phone lookup, not message content, so repeated
//! webhook deliveries for the same phone are idempotent: a phone that
//! already resolves never gets a duplicate customer.

use std::sync::Arc;

use tracing::info;

use wappdesk_core::types::{Customer, LogKind, WhatsAppLog};
use wappdesk_core::{DeskStore, EventLog, WappdeskError};

/// Finds a customer by phone, or auto-creates one from the gateway-supplied
/// sender name.
pub struct CustomerResolver {
    store: Arc<dyn DeskStore>,
    log: EventLog,
}

impl CustomerResolver {
    pub fn new(store: Arc<dyn DeskStore>, log: EventLog) -> Self {
        Self { store, log }
    }

    /// Find the customer for a phone without creating one.
    pub async fn lookup(&self, phone: &str) -> Result<Option<Customer>, WappdeskError> {
        self.store.find_customer_by_phone(phone).await
    }

    /// Create a customer for a phone with no match. The name is the sender
    /// name when present and non-blank, else a placeholder containing the
    /// phone.
    pub async fn create(&self, phone: &str, sender_name: &str) -> Result<Customer, WappdeskError> {
        let name = sender_name.trim();
        let name = if name.is_empty() {
            format!("לקוח חדש - {phone}")
        } else {
            name.to_string()
        };

        let customer = Customer::new(name, phone);
        self.store.create_customer(&customer).await?;
        info!(phone, name = %customer.name, "auto-created customer");

        self.log
            .record(
                WhatsAppLog::event(
                    LogKind::CustomerIdentified,
                    phone,
                    format!("לקוח חדש נוצר אוטומטית: {}", customer.name),
                )
                .with_customer(&customer.id),
            )
            .await;

        Ok(customer)
    }

    /// Find or create. Returns the customer and whether it was created in
    /// this call.
    pub async fn resolve(
        &self,
        phone: &str,
        sender_name: &str,
    ) -> Result<(Customer, bool), WappdeskError> {
        match self.lookup(phone).await? {
            Some(customer) => Ok((customer, false)),
            None => Ok((self.create(phone, sender_name).await?, true)),
        }
    }
}
