// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `wappdesk serve` command implementation.
//!
//! Wires the SQLite store, the Green API client, the conversation store with
//! its inactivity sweeper, and the bot engine into the gateway HTTP server,
//! then serves until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use wappdesk_bot::{BotEngine, ConversationStore};
use wappdesk_config::WappdeskConfig;
use wappdesk_core::{DeskStore, EventLog, OutboundSender, WappdeskError};
use wappdesk_gateway::{start_server, GatewayState};
use wappdesk_greenapi::GreenApiClient;
use wappdesk_storage::SqliteStore;

/// Runs the `wappdesk serve` command.
pub async fn run_serve(config: WappdeskConfig) -> Result<(), WappdeskError> {
    init_tracing(&config.agent.log_level);
    info!("starting wappdesk serve");

    let store: Arc<dyn DeskStore> =
        Arc::new(SqliteStore::from_config(&config.storage).await?);
    info!(path = %config.storage.database_path, "storage ready");

    let log = EventLog::new(store.clone());
    let sender: Arc<dyn OutboundSender> =
        Arc::new(GreenApiClient::new(&config.greenapi, log)?);

    let conversations =
        ConversationStore::new(Duration::from_secs(config.bot.idle_timeout_minutes * 60));
    let sweeper = conversations
        .spawn_sweeper(Duration::from_secs(config.bot.sweep_interval_minutes * 60));

    let engine = Arc::new(BotEngine::new(
        store.clone(),
        sender.clone(),
        conversations,
        config.company.clone(),
    ));

    let state = GatewayState {
        engine,
        sender,
        store,
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    };

    start_server(&config.webhook, state, shutdown).await?;

    sweeper.shutdown().await;
    info!("wappdesk stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the configured level, letting
/// `RUST_LOG` override it.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
