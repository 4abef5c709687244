// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Wappdesk service-desk bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Wappdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WappdeskConfig {
    /// Process-level settings (log level).
    #[serde(default)]
    pub agent: AgentConfig,

    /// Green API gateway credentials and endpoint.
    #[serde(default)]
    pub greenapi: GreenApiConfig,

    /// Inbound webhook server settings.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Company branding used only to template outbound text.
    #[serde(default)]
    pub company: CompanyConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation store settings.
    #[serde(default)]
    pub bot: BotConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Green API gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GreenApiConfig {
    /// Base URL of the Green API service.
    #[serde(default = "default_greenapi_url")]
    pub base_url: String,

    /// Green API instance id. Empty disables outbound sending.
    #[serde(default)]
    pub instance_id: String,

    /// Green API access token. Empty disables outbound sending.
    #[serde(default)]
    pub token: String,

    /// Outbound request timeout in seconds.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for GreenApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_greenapi_url(),
            instance_id: String::new(),
            token: String::new(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

fn default_greenapi_url() -> String {
    "https://api.green-api.com".to_string()
}

fn default_send_timeout_secs() -> u64 {
    15
}

/// Inbound webhook server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared secret checked against the `key` query parameter.
    /// Empty rejects all requests (fail-closed).
    #[serde(default)]
    pub key: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            key: String::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3002
}

/// Company branding substituted into outbound message templates.
/// No behavioral effect.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyConfig {
    /// Company display name.
    #[serde(default = "default_company_name")]
    pub name: String,

    /// Privacy policy URL shown in the first-contact greeting.
    #[serde(default = "default_privacy_url")]
    pub privacy_url: String,

    /// Customer portal URL appended to status messages.
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    /// Phone number offered for urgent contact and fallbacks.
    #[serde(default = "default_support_phone")]
    pub support_phone: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            privacy_url: default_privacy_url(),
            portal_url: default_portal_url(),
            support_phone: default_support_phone(),
        }
    }
}

fn default_company_name() -> String {
    "Wappdesk".to_string()
}

fn default_privacy_url() -> String {
    "https://example.com/privacy".to_string()
}

fn default_portal_url() -> String {
    "https://example.com/portal".to_string()
}

fn default_support_phone() -> String {
    "03-1234567".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("wappdesk").join("wappdesk.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "wappdesk.db".to_string())
}

/// Conversation store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Minutes of inactivity after which a conversation resets to idle.
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: u64,

    /// Minutes between inactivity sweeps.
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout_minutes(),
            sweep_interval_minutes: default_sweep_interval_minutes(),
        }
    }
}

fn default_idle_timeout_minutes() -> u64 {
    30
}

fn default_sweep_interval_minutes() -> u64 {
    5
}
