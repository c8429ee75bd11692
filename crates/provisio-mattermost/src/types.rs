// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mattermost API payloads.

use provisio_core::normalize::status_from_delete_at;
use provisio_core::UserRecord;
use serde::Deserialize;

/// A user as returned by the Mattermost users API.
#[derive(Debug, Clone, Deserialize)]
pub struct MattermostUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Hidden unless the token may see emails.
    #[serde(default)]
    pub email: String,
    /// Milliseconds since epoch of deactivation; zero while active.
    #[serde(default)]
    pub delete_at: i64,
}

impl From<MattermostUser> for UserRecord {
    fn from(user: MattermostUser) -> Self {
        UserRecord {
            status: status_from_delete_at(user.delete_at),
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// Generic `{"status": "OK"}` acknowledgement.
#[derive(Debug, Deserialize)]
pub struct StatusOk {
    #[serde(default)]
    pub status: String,
}

impl StatusOk {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
