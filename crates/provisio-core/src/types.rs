// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical types shared by every platform adapter.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The normalized user record every adapter produces, regardless of platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Platform-native identifier. Platforms without ids use a placeholder.
    pub id: String,
    /// Unique handle on the platform.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Empty when the platform does not expose email addresses.
    pub email: String,
    /// `true` = active/enabled, `false` = blocked/disabled/soft-deleted.
    pub status: bool,
}

/// Input for account creation.
///
/// Each adapter maps this into its platform's request shape.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    /// Combined "First Last" name.
    pub display_name: String,
    pub password: SecretString,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            display_name: display_name.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Identifies the external system behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Source-control host.
    Gitlab,
    /// Team-chat server.
    Mattermost,
    /// Object-storage admin API, driven through the `mc` CLI.
    Minio,
    /// Container-registry host.
    Harbor,
}

/// Tag of a user-lifecycle operation, used for capability queries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Block,
    Unblock,
    Remove,
    Lookup,
    List,
}

/// A logical operation routed to one platform by the dispatcher.
#[derive(Debug)]
pub enum OperationRequest {
    Create(NewUser),
    Block { id: String, username: String },
    Unblock { id: String, username: String },
    Remove { id: String, username: String },
    Lookup { username: String },
    List,
}

impl OperationRequest {
    /// The capability tag this request needs.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Create(_) => Operation::Create,
            Self::Block { .. } => Operation::Block,
            Self::Unblock { .. } => Operation::Unblock,
            Self::Remove { .. } => Operation::Remove,
            Self::Lookup { .. } => Operation::Lookup,
            Self::List => Operation::List,
        }
    }
}

/// The successful result of a dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The account was created; the platform's view of it.
    Created(UserRecord),
    /// A block/unblock/remove call ran; `false` means the platform declined.
    Applied(bool),
    /// The platform id resolved from a username.
    UserId(String),
    /// The full user listing in the platform's native order.
    Users(Vec<UserRecord>),
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Platform is reachable and answering.
    Healthy,
    /// Platform answered but reported a problem.
    Degraded(String),
    /// Platform is not reachable.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn request_maps_to_operation_tag() {
        let create = OperationRequest::Create(NewUser::new("a@b.c", "ada", "Ada Lovelace", "pw"));
        assert_eq!(create.operation(), Operation::Create);
        assert_eq!(
            OperationRequest::Remove {
                id: "1".into(),
                username: "ada".into()
            }
            .operation(),
            Operation::Remove
        );
        assert_eq!(OperationRequest::List.operation(), Operation::List);
    }

    #[test]
    fn platform_kind_parses_lowercase() {
        for kind in [
            PlatformKind::Gitlab,
            PlatformKind::Mattermost,
            PlatformKind::Minio,
            PlatformKind::Harbor,
        ] {
            let parsed = PlatformKind::from_str(&kind.to_string()).expect("should parse back");
            assert_eq!(kind, parsed);
        }
        assert_eq!(PlatformKind::from_str("harbor").unwrap(), PlatformKind::Harbor);
    }

    #[test]
    fn new_user_password_is_not_debug_printed() {
        let user = NewUser::new("a@b.c", "ada", "Ada Lovelace", "hunter2-hunter2");
        let debug = format!("{user:?}");
        assert!(!debug.contains("hunter2-hunter2"), "got: {debug}");
        assert_eq!(user.password.expose_secret(), "hunter2-hunter2");
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(OperationOutcome::Applied(false)).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "applied", "value": false}));
    }
}
