// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON lines emitted by `mc --json`.

use provisio_core::normalize::{status_from_user_status, PLACEHOLDER_ID};
use provisio_core::UserRecord;
use serde::Deserialize;

/// One line of `mc admin user list --json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McUserEntry {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub user_status: String,
    #[serde(default)]
    pub error: Option<McErrorDetail>,
}

/// Error object `mc` prints when a command fails in JSON mode.
#[derive(Debug, Clone, Deserialize)]
pub struct McErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Any `mc --json` line that may carry a failure.
#[derive(Debug, Clone, Deserialize)]
pub struct McStatusLine {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<McErrorDetail>,
}

impl McStatusLine {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

impl From<McUserEntry> for UserRecord {
    fn from(entry: McUserEntry) -> Self {
        UserRecord {
            id: PLACEHOLDER_ID.to_string(),
            status: status_from_user_status(&entry.user_status),
            username: entry.access_key,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_maps_to_record_without_personal_fields() {
        let entry: McUserEntry = serde_json::from_str(
            r#"{"status":"success","accessKey":"ada","userStatus":"enabled","policyName":"readwrite"}"#,
        )
        .unwrap();
        let record = UserRecord::from(entry);
        assert_eq!(record.id, "000");
        assert_eq!(record.username, "ada");
        assert!(record.status);
        assert!(record.first_name.is_empty());
        assert!(record.last_name.is_empty());
        assert!(record.email.is_empty());
    }

    #[test]
    fn disabled_entry_is_inactive() {
        let entry: McUserEntry =
            serde_json::from_str(r#"{"status":"success","accessKey":"bob","userStatus":"disabled"}"#)
                .unwrap();
        assert!(!UserRecord::from(entry).status);
    }

    #[test]
    fn error_line_is_detected() {
        let line: McStatusLine = serde_json::from_str(
            r#"{"status":"error","error":{"message":"Unable to get user info","cause":{}}}"#,
        )
        .unwrap();
        assert!(line.is_error());
        assert_eq!(line.error.unwrap().message, "Unable to get user info");
    }
}
