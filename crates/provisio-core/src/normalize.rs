// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared rules for mapping heterogeneous platform payloads into [`UserRecord`]s.
//!
//! Status derivation differs per platform:
//!
//! | Platform   | Active when                      |
//! |------------|----------------------------------|
//! | GitLab     | `state == "active"`              |
//! | Mattermost | `delete_at == 0`                 |
//! | MinIO      | `userStatus == "enabled"`        |
//! | Harbor     | always (no disabled state exists) |
//!
//! [`UserRecord`]: crate::types::UserRecord

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ProvisionError;

/// Id reported by platforms that have no user identifiers.
pub const PLACEHOLDER_ID: &str = "000";

/// Splits a combined display name on the first whitespace run.
///
/// `"Ada Lovelace"` yields `("Ada", "Lovelace")`, `"Madonna"` yields
/// `("Madonna", "")`. Anything after the first whitespace stays in the last name.
pub fn split_display_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// GitLab account state.
pub fn status_from_state(state: &str) -> bool {
    state == "active"
}

/// Mattermost soft-delete timestamp; zero means the account was never deactivated.
pub fn status_from_delete_at(delete_at: i64) -> bool {
    delete_at == 0
}

/// MinIO access key status.
pub fn status_from_user_status(user_status: &str) -> bool {
    user_status == "enabled"
}

/// Decodes a JSON payload, reporting only its size on failure.
pub fn parse_json<T: DeserializeOwned>(platform: &str, payload: &[u8]) -> Result<T, ProvisionError> {
    serde_json::from_slice(payload)
        .map_err(|e| ProvisionError::malformed(platform, payload, json_error_reason(&e)))
}

/// Describes a decoding failure by category and position only.
///
/// serde_json's own message quotes offending values, which may be emails or tokens.
pub fn json_error_reason(e: &serde_json::Error) -> String {
    let kind = match e.classify() {
        Category::Io => "io error",
        Category::Syntax => "syntax error",
        Category::Data => "data error",
        Category::Eof => "truncated input",
    };
    format!("{kind} at line {} column {}", e.line(), e.column())
}

/// First-match-wins username resolution.
///
/// Duplicate matches are not reported; the platform's own ordering decides.
pub fn first_match<T>(
    platform: &str,
    username: &str,
    matches: Vec<T>,
) -> Result<T, ProvisionError> {
    matches
        .into_iter()
        .next()
        .ok_or_else(|| ProvisionError::LookupNotFound {
            platform: platform.to_string(),
            username: username.to_string(),
        })
}
