// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Wappdesk service-desk bot.
//!
//! Provides the shared error type, the domain model (customers, service
//! calls, message records, log events), the trait seams to the persistence
//! layer and the outbound gateway, and the append-only event logger.

pub mod error;
pub mod eventlog;
pub mod traits;
pub mod types;

pub use error::WappdeskError;
pub use eventlog::EventLog;
pub use traits::{DeskStore, OutboundSender};
pub use types::MessageId;
