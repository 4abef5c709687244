// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number canonicalization between local Israeli form and the
//! Green API chat-address form.
//!
//! Pure, total functions: malformed input comes back unnormalized rather
//! than failing.

const COUNTRY_PREFIX: &str = "972";
const CHAT_SUFFIX: &str = "@c.us";
const GROUP_SUFFIX: &str = "@g.us";

/// Format a phone number as a Green API individual-chat address.
///
/// Strips non-digits, replaces a leading "0" with the country prefix, and
/// appends the chat suffix: `"0501234567"` -> `"972501234567@c.us"`.
/// Input already in international form (bare or with a leading "+") is left
/// as-is apart from the suffix.
pub fn to_chat_address(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let international = match digits.strip_prefix('0') {
        Some(rest) => format!("{COUNTRY_PREFIX}{rest}"),
        None => digits,
    };
    format!("{international}{CHAT_SUFFIX}")
}

/// Extract the local-form phone number from a Green API chat address.
///
/// Strips the individual/group chat suffix and rewrites the country prefix
/// to a leading "0": `"972501234567@c.us"` -> `"0501234567"`. Addresses
/// without the country prefix are returned unchanged.
pub fn from_chat_address(chat_id: &str) -> String {
    let bare = chat_id
        .strip_suffix(CHAT_SUFFIX)
        .or_else(|| chat_id.strip_suffix(GROUP_SUFFIX))
        .unwrap_or(chat_id);
    match bare.strip_prefix(COUNTRY_PREFIX) {
        Some(rest) => format!("0{rest}"),
        None => bare.to_string(),
    }
}
