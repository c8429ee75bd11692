// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mattermost team-chat adapter for Provisio.
//!
//! Talks to the Mattermost v4 REST API through [`RestTransport`]. Blocking
//! toggles the user's `active` sub-resource; removal is a permanent delete.
//!
//! Status rule: active when `delete_at == 0`. Mattermost already stores
//! first and last names separately, so no splitting happens on reads.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use provisio_core::normalize::{first_match, split_display_name};
use provisio_core::{
    HealthStatus, NewUser, Operation, PlatformAdapter, PlatformCredentials, PlatformKind,
    ProvisionError, UserRecord, UserRemoval,
};
use provisio_transport::{Method, RestTransport};
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::types::{MattermostUser, StatusOk};

/// Prefix of every Mattermost REST endpoint.
const API_PREFIX: &str = "/api/v4";

/// Page size for the user listing (Mattermost's maximum).
const PER_PAGE: usize = 200;

const CAPABILITIES: &[Operation] = &[
    Operation::Create,
    Operation::Block,
    Operation::Unblock,
    Operation::Remove,
    Operation::Lookup,
    Operation::List,
];

/// Mattermost adapter implementing [`PlatformAdapter`] and [`UserRemoval`].
#[derive(Debug)]
pub struct MattermostAdapter {
    platform_id: String,
    transport: RestTransport,
}

impl MattermostAdapter {
    /// Creates the adapter. No network I/O happens here.
    pub fn new(
        platform_id: &str,
        credentials: &PlatformCredentials,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        Ok(Self {
            platform_id: platform_id.to_string(),
            transport: RestTransport::with_timeout(platform_id, credentials, timeout)?,
        })
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<bool, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users/{id}/active");
        let response = self
            .transport
            .execute(Method::Put, &endpoint, Some(&json!({ "active": active })), &[])
            .await?;
        // Older servers answer with an empty body.
        if response.body.is_empty() {
            return Ok(true);
        }
        Ok(response.json::<StatusOk>(&self.platform_id)?.is_ok())
    }
}

#[async_trait]
impl PlatformAdapter for MattermostAdapter {
    fn platform_id(&self) -> &str {
        &self.platform_id
    }

    fn kind(&self) -> PlatformKind {
        PlatformKind::Mattermost
    }

    fn capabilities(&self) -> &'static [Operation] {
        CAPABILITIES
    }

    fn removal(&self) -> Option<&dyn UserRemoval> {
        Some(self)
    }

    async fn health_check(&self) -> Result<HealthStatus, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/system/ping");
        let response = match self.transport.execute(Method::Get, &endpoint, None, &[]).await {
            Ok(response) => response,
            Err(e) => return Ok(HealthStatus::Unhealthy(format!("Mattermost unreachable: {e}"))),
        };
        match response.json::<StatusOk>(&self.platform_id) {
            Ok(ack) if ack.is_ok() => Ok(HealthStatus::Healthy),
            Ok(ack) => Ok(HealthStatus::Degraded(format!("ping status `{}`", ack.status))),
            Err(e) => Ok(HealthStatus::Degraded(e.to_string())),
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProvisionError> {
        let (first_name, last_name) = split_display_name(&user.display_name);
        let body = json!({
            "email": user.email,
            "username": user.username,
            "first_name": first_name,
            "last_name": last_name,
            "password": user.password.expose_secret(),
        });
        let endpoint = format!("{API_PREFIX}/users");

        let created: MattermostUser = self
            .transport
            .execute(Method::Post, &endpoint, Some(&body), &[])
            .await
            .and_then(|response| response.json(&self.platform_id))
            .inspect_err(|e| {
                warn!(platform = %self.platform_id, username = %user.username, error = %e, "user creation failed");
            })?;

        info!(platform = %self.platform_id, username = %created.username, id = %created.id, "user created");
        Ok(created.into())
    }

    async fn block_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        let applied = self.set_active(id, false).await.inspect_err(|e| {
            warn!(platform = %self.platform_id, id, username, error = %e, "deactivation failed");
        })?;
        info!(platform = %self.platform_id, id, username, applied, "user deactivated");
        Ok(applied)
    }

    async fn unblock_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        let applied = self.set_active(id, true).await.inspect_err(|e| {
            warn!(platform = %self.platform_id, id, username, error = %e, "activation failed");
        })?;
        info!(platform = %self.platform_id, id, username, applied, "user activated");
        Ok(applied)
    }

    async fn get_user_id(&self, username: &str) -> Result<String, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users/usernames");
        let matches: Vec<MattermostUser> = self
            .transport
            .execute(Method::Post, &endpoint, Some(&json!([username])), &[])
            .await?
            .json(&self.platform_id)?;
        Ok(first_match(&self.platform_id, username, matches)?.id)
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users");
        let mut records = Vec::new();
        let mut page = 0usize;
        let mut previous_first: Option<String> = None;

        loop {
            let batch: Vec<MattermostUser> = self
                .transport
                .execute(
                    Method::Get,
                    &endpoint,
                    None,
                    &[("page", page.to_string()), ("per_page", PER_PAGE.to_string())],
                )
                .await
                .and_then(|response| response.json(&self.platform_id))
                .inspect_err(|e| {
                    warn!(platform = %self.platform_id, page, error = %e, "listing users failed");
                })?;
            // A server that ignores `page` keeps answering with the first page.
            let first = batch.first().map(|user| user.id.clone());
            if first.is_some() && first == previous_first {
                warn!(platform = %self.platform_id, page, "page repeated, stopping pagination");
                break;
            }
            previous_first = first;

            let fetched = batch.len();
            records.extend(batch.into_iter().map(UserRecord::from));
            debug!(platform = %self.platform_id, page, fetched, "fetched user page");
            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(records)
    }
}

#[async_trait]
impl UserRemoval for MattermostAdapter {
    async fn remove_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users/{id}?permanent=true");
        self.transport
            .execute(Method::Delete, &endpoint, None, &[])
            .await
            .inspect_err(|e| {
                warn!(platform = %self.platform_id, id, username, error = %e, "removal failed");
            })?;
        info!(platform = %self.platform_id, id, username, "user permanently removed");
        Ok(true)
    }
}
