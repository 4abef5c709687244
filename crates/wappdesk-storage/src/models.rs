// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `wappdesk-core::types` for use across
//! the trait boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use wappdesk_core::types::{
    Customer, DashboardStats, LogQuery, MessageQuery, Page, ServiceCall, ServiceCallDraft,
    WhatsAppLog, WhatsAppMessage,
};
