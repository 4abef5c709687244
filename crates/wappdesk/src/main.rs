// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wappdesk - WhatsApp service-desk bot.
//!
//! This is the binary entry point for the Wappdesk server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Wappdesk - WhatsApp service-desk bot.
#[derive(Parser, Debug)]
#[command(name = "wappdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server and bot.
    Serve,
    /// Load the configuration, validate it, and print a summary.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match wappdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            wappdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("wappdesk: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::CheckConfig) => {
            println!(
                "wappdesk: config ok (webhook {}:{}, db {})",
                config.webhook.host, config.webhook.port, config.storage.database_path
            );
        }
        None => {
            println!("wappdesk: use --help for available commands");
        }
    }
}
