// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per entity.

pub mod customers;
pub mod logs;
pub mod messages;
pub mod service_calls;
pub mod stats;

/// Parse a stored enum string into its Rust enum, mapping failures onto the
/// column they came from.
pub(crate) fn parse_enum<T>(idx: usize, value: String) -> Result<T, rusqlite::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
