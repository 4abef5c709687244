// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of a loaded configuration.

use crate::diagnostic::ConfigError;
use crate::model::WappdeskConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate invariants Figment cannot express in the type system.
///
/// Collects every violation rather than stopping at the first.
pub fn validate_config(config: &WappdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::new(
            format!(
                "agent.log_level must be one of {LOG_LEVELS:?}, got {:?}",
                config.agent.log_level
            ),
            Some("try: log_level = \"info\"".into()),
        ));
    }

    if config.bot.idle_timeout_minutes == 0 {
        errors.push(ConfigError::new(
            "bot.idle_timeout_minutes must be at least 1".into(),
            None,
        ));
    }

    if config.bot.sweep_interval_minutes == 0 {
        errors.push(ConfigError::new(
            "bot.sweep_interval_minutes must be at least 1".into(),
            None,
        ));
    }

    if config.greenapi.base_url.is_empty() {
        errors.push(ConfigError::new(
            "greenapi.base_url must not be empty".into(),
            Some("default is https://api.green-api.com".into()),
        ));
    }

    if config.greenapi.send_timeout_secs == 0 {
        errors.push(ConfigError::new(
            "greenapi.send_timeout_secs must be at least 1".into(),
            None,
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
