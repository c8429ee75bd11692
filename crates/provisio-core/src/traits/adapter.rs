// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mandatory user-lifecycle capability set.

use async_trait::async_trait;

use crate::error::ProvisionError;
use crate::traits::removal::UserRemoval;
use crate::types::{HealthStatus, NewUser, Operation, PlatformKind, UserRecord};

/// A platform-specific implementation of the user-lifecycle operations.
///
/// Adapters are constructed once per platform and shared for the process
/// lifetime; every method takes `&self` and may be called concurrently.
#[async_trait]
pub trait PlatformAdapter: Send + Sync + 'static {
    /// The configured platform id this adapter serves (e.g. `"source-control"`).
    fn platform_id(&self) -> &str;

    /// The external system behind this adapter.
    fn kind(&self) -> PlatformKind;

    /// The operations this adapter actually performs.
    ///
    /// The dispatcher rejects anything outside this set before calling in.
    fn capabilities(&self) -> &'static [Operation];

    /// Returns true if `operation` is in [`PlatformAdapter::capabilities`].
    fn supports(&self, operation: Operation) -> bool {
        self.capabilities().contains(&operation)
    }

    /// The permanent-deletion extension, for platforms that have one.
    fn removal(&self) -> Option<&dyn UserRemoval> {
        None
    }

    /// Checks that the platform is reachable with the configured credentials.
    async fn health_check(&self) -> Result<HealthStatus, ProvisionError>;

    /// Creates an account and returns the platform's view of it.
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProvisionError>;

    /// Blocks or disables the account. Returns `false` if the platform declined.
    async fn block_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError>;

    /// Reverses [`PlatformAdapter::block_user`] where the platform allows it.
    async fn unblock_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError>;

    /// Resolves a username to the platform's id. The first match wins.
    async fn get_user_id(&self, username: &str) -> Result<String, ProvisionError>;

    /// Fetches the complete user collection in the platform's listing order.
    async fn get_users(&self) -> Result<Vec<UserRecord>, ProvisionError>;
}
