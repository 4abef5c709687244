// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./wappdesk.toml` > `~/.config/wappdesk/wappdesk.toml`
//! > `/etc/wappdesk/wappdesk.toml` with environment variable overrides via
//! `WAPPDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WappdeskConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/wappdesk/wappdesk.toml` (system-wide)
/// 3. `~/.config/wappdesk/wappdesk.toml` (user XDG config)
/// 4. `./wappdesk.toml` (local directory)
/// 5. `WAPPDESK_*` environment variables
pub fn load_config() -> Result<WappdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WappdeskConfig::default()))
        .merge(Toml::file("/etc/wappdesk/wappdesk.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("wappdesk/wappdesk.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("wappdesk.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<WappdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WappdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WappdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WappdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `WAPPDESK_GREENAPI_INSTANCE_ID` must map
/// to `greenapi.instance_id`, not `greenapi.instance.id`.
fn env_provider() -> Env {
    Env::prefixed("WAPPDESK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: WAPPDESK_GREENAPI_TOKEN -> "greenapi_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("greenapi_", "greenapi.", 1)
            .replacen("webhook_", "webhook.", 1)
            .replacen("company_", "company.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("bot_", "bot.", 1);
        mapped.into()
    })
}
