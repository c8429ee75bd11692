// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GitLab source-control adapter for Provisio.
//!
//! Implements [`PlatformAdapter`] on top of the GitLab v4 users API.
//! Blocking is recoverable (`state = blocked`); permanent deletion is not offered.
//!
//! Status rule: a user is active when GitLab reports `state == "active"`.
//! Name rule: the combined `name` field is split on the first space.

mod client;

use std::time::Duration;

use async_trait::async_trait;
use provisio_core::normalize::{first_match, split_display_name, status_from_state};
use provisio_core::{
    HealthStatus, NewUser, Operation, PlatformAdapter, PlatformCredentials, PlatformKind,
    ProvisionError, UserRecord,
};
use provisio_transport::RestTransport;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::client::{GitlabClient, GitlabUser};

const CAPABILITIES: &[Operation] = &[
    Operation::Create,
    Operation::Block,
    Operation::Unblock,
    Operation::Lookup,
    Operation::List,
];

/// GitLab adapter implementing [`PlatformAdapter`].
#[derive(Debug)]
pub struct GitlabAdapter {
    platform_id: String,
    client: GitlabClient,
}

impl GitlabAdapter {
    /// Creates the adapter. No network I/O happens here.
    pub fn new(
        platform_id: &str,
        credentials: &PlatformCredentials,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        let transport = RestTransport::with_timeout(platform_id, credentials, timeout)?;
        Ok(Self {
            platform_id: platform_id.to_string(),
            client: GitlabClient::new(transport),
        })
    }
}

fn to_record(user: GitlabUser) -> UserRecord {
    let (first_name, last_name) = split_display_name(&user.name);
    UserRecord {
        id: user.id.to_string(),
        username: user.username,
        first_name,
        last_name,
        email: user.email.unwrap_or_default(),
        status: status_from_state(&user.state),
    }
}

/// The `POST /users` body. Confirmation mail is skipped because the
/// account is provisioned on the user's behalf.
fn create_body(user: &NewUser) -> Value {
    json!({
        "email": user.email,
        "username": user.username,
        "name": user.display_name,
        "password": user.password.expose_secret(),
        "skip_confirmation": true,
    })
}

#[async_trait]
impl PlatformAdapter for GitlabAdapter {
    fn platform_id(&self) -> &str {
        &self.platform_id
    }

    fn kind(&self) -> PlatformKind {
        PlatformKind::Gitlab
    }

    fn capabilities(&self) -> &'static [Operation] {
        CAPABILITIES
    }

    async fn health_check(&self) -> Result<HealthStatus, ProvisionError> {
        match self.client.version().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("GitLab unreachable: {e}"))),
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProvisionError> {
        let body = create_body(user);
        let created = self.client.create_user(&body).await.inspect_err(|e| {
            warn!(platform = %self.platform_id, username = %user.username, error = %e, "user creation failed");
        })?;
        info!(platform = %self.platform_id, username = %created.username, id = created.id, "user created");
        Ok(to_record(created))
    }

    async fn block_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        let applied = self.client.transition(id, "block").await.inspect_err(|e| {
            warn!(platform = %self.platform_id, id, username, error = %e, "block failed");
        })?;
        info!(platform = %self.platform_id, id, username, applied, "user blocked");
        Ok(applied)
    }

    async fn unblock_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        let applied = self.client.transition(id, "unblock").await.inspect_err(|e| {
            warn!(platform = %self.platform_id, id, username, error = %e, "unblock failed");
        })?;
        info!(platform = %self.platform_id, id, username, applied, "user unblocked");
        Ok(applied)
    }

    async fn get_user_id(&self, username: &str) -> Result<String, ProvisionError> {
        let user = self
            .client
            .users_by_username(username)
            .await
            .and_then(|matches| first_match(&self.platform_id, username, matches))
            .inspect_err(|e| {
                warn!(platform = %self.platform_id, username, error = %e, "lookup failed");
            })?;
        Ok(user.id.to_string())
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>, ProvisionError> {
        let users = self.client.all_users().await.inspect_err(|e| {
            warn!(platform = %self.platform_id, error = %e, "listing users failed");
        })?;
        Ok(users.into_iter().map(to_record).collect())
    }
}
