// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Wappdesk workspace.
//!
//! [`MemoryStore`] implements `DeskStore` in memory with injectable failures;
//! [`RecordingSender`] implements `OutboundSender`, capturing every send for
//! assertion.

pub mod memory_store;
pub mod recording_sender;

pub use memory_store::MemoryStore;
pub use recording_sender::RecordingSender;
