// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed client for the GitLab users API (v4).
//!
//! Stays private to the adapter; callers only ever see [`UserRecord`]s.
//!
//! [`UserRecord`]: provisio_core::UserRecord

use provisio_core::ProvisionError;
use provisio_transport::{Method, RestTransport};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Prefix of every GitLab REST endpoint.
pub(crate) const API_PREFIX: &str = "/api/v4";

/// Page size for the full user enumeration (GitLab's maximum).
const PER_PAGE: u32 = 100;

/// A user as returned by the GitLab users API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GitlabUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    /// Only visible to administrators.
    #[serde(default)]
    pub email: Option<String>,
    pub state: String,
}

#[derive(Debug, Clone)]
pub(crate) struct GitlabClient {
    transport: RestTransport,
}

impl GitlabClient {
    pub fn new(transport: RestTransport) -> Self {
        Self { transport }
    }

    fn platform(&self) -> &str {
        self.transport.platform()
    }

    pub async fn create_user(&self, body: &Value) -> Result<GitlabUser, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users");
        self.transport
            .execute(Method::Post, &endpoint, Some(body), &[])
            .await?
            .json(self.platform())
    }

    /// Runs a state transition (`block` or `unblock`) on one user.
    ///
    /// GitLab answers `true`/`false`; a success status with any other body
    /// counts as applied.
    pub async fn transition(&self, id: &str, action: &str) -> Result<bool, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users/{id}/{action}");
        let response = self
            .transport
            .execute(Method::Post, &endpoint, None, &[])
            .await?;
        Ok(match serde_json::from_slice::<Value>(&response.body) {
            Ok(Value::Bool(applied)) => applied,
            _ => true,
        })
    }

    pub async fn users_by_username(&self, username: &str) -> Result<Vec<GitlabUser>, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users");
        self.transport
            .execute(
                Method::Get,
                &endpoint,
                None,
                &[("username", username.to_string())],
            )
            .await?
            .json(self.platform())
    }

    /// Enumerates every user by following `X-Next-Page` until it is empty.
    pub async fn all_users(&self) -> Result<Vec<GitlabUser>, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/users");
        let mut users = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .transport
                .execute(
                    Method::Get,
                    &endpoint,
                    None,
                    &[
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let batch: Vec<GitlabUser> = response.json(self.platform())?;
            let fetched = batch.len();
            users.extend(batch);
            debug!(platform = self.platform(), page, fetched, "fetched user page");

            let next = response
                .header("x-next-page")
                .map(str::trim)
                .and_then(|s| s.parse::<u32>().ok());
            match next {
                Some(next) if fetched > 0 && next > page => page = next,
                _ => break,
            }
        }

        Ok(users)
    }

    pub async fn version(&self) -> Result<Value, ProvisionError> {
        let endpoint = format!("{API_PREFIX}/version");
        self.transport
            .execute(Method::Get, &endpoint, None, &[])
            .await?
            .json(self.platform())
    }
}
