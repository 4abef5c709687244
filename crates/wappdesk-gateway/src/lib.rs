// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP webhook ingress and admin API for the Wappdesk service-desk bot.
//!
//! Receives Green API webhook notifications, authenticates them with a
//! shared-secret query parameter, and drives the bot engine. Also exposes a
//! manual-send endpoint and the dashboard admin API.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{build_router, start_server, GatewayState};
