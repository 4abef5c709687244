// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors into miette diagnostics with
//! valid key listings, and renders them Elm-style to stderr.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic help text.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(wappdesk::config::unknown_key),
        help("valid keys: {valid_keys}")
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// List of valid keys for the section.
        valid_keys: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(wappdesk::config::invalid_type))]
    InvalidType {
        /// The key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(wappdesk::config::validation), help("{}", help.as_deref().unwrap_or("see wappdesk.toml.example")))]
    Validation {
        /// Description of the validation failure.
        message: String,
        /// Optional fix suggestion.
        help: Option<String>,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(wappdesk::config::other))]
    Other(String),
}

impl ConfigError {
    /// Validation-failure constructor used by the validation pass.
    pub fn new(message: String, help: Option<String>) -> Self {
        Self::Validation { message, help }
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A single figment error may contain multiple underlying errors; each is
/// converted to the closest `ConfigError` variant.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let path = error.path.join(".");
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => ConfigError::UnknownKey {
                key: if path.is_empty() {
                    field.to_string()
                } else {
                    format!("{path}.{field}")
                },
                valid_keys: expected.join(", "),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: path,
                detail: format!("found {actual}, expected {expected}"),
            },
            other => ConfigError::Other(format!("{other}")),
        };
        errors.push(config_error);
    }

    errors
}

/// Render all collected errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        let report = match error {
            ConfigError::UnknownKey { valid_keys, .. } => {
                report.wrap_err(format!("valid keys: {valid_keys}"))
            }
            ConfigError::Validation {
                help: Some(help), ..
            } => report.wrap_err(help.clone()),
            _ => report,
        };
        eprintln!("{report:?}");
    }
    eprintln!(
        "wappdesk: {} configuration error{} found",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}
