// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading and validation.

use wappdesk_config::{load_and_validate_str, load_config_from_str, ConfigError};

#[test]
fn empty_config_loads_with_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.greenapi.base_url, "https://api.green-api.com");
    assert_eq!(config.greenapi.send_timeout_secs, 15);
    assert_eq!(config.webhook.host, "0.0.0.0");
    assert_eq!(config.webhook.port, 3002);
    assert_eq!(config.company.support_phone, "03-1234567");
    assert_eq!(config.bot.idle_timeout_minutes, 30);
}

#[test]
fn full_config_overrides_defaults() {
    let toml = r#"
        [agent]
        log_level = "debug"

        [greenapi]
        base_url = "http://localhost:9000"
        instance_id = "1101000001"
        token = "abc123"
        send_timeout_secs = 5

        [webhook]
        host = "127.0.0.1"
        port = 8080
        key = "shared-secret"

        [company]
        name = "Acme Cranes"
        privacy_url = "https://acme.example/privacy"
        portal_url = "https://acme.example/portal"
        support_phone = "03-7654321"

        [storage]
        database_path = "/tmp/wappdesk-test.db"

        [bot]
        idle_timeout_minutes = 10
        sweep_interval_minutes = 1
    "#;
    let config = load_and_validate_str(toml).unwrap();
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.greenapi.instance_id, "1101000001");
    assert_eq!(config.greenapi.token, "abc123");
    assert_eq!(config.webhook.key, "shared-secret");
    assert_eq!(config.company.name, "Acme Cranes");
    assert_eq!(config.storage.database_path, "/tmp/wappdesk-test.db");
    assert_eq!(config.bot.idle_timeout_minutes, 10);
}

#[test]
fn unknown_section_key_is_a_diagnostic() {
    let errors = load_and_validate_str("[greenapi]\napi_key = \"x\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { .. })));
}

#[test]
fn invalid_log_level_fails_validation() {
    let errors = load_and_validate_str("[agent]\nlog_level = \"shout\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn zero_idle_timeout_fails_validation() {
    let errors = load_and_validate_str("[bot]\nidle_timeout_minutes = 0\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("idle_timeout_minutes"));
}
