// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the bot core and its collaborators.

pub mod sender;
pub mod store;

pub use sender::OutboundSender;
pub use store::DeskStore;
