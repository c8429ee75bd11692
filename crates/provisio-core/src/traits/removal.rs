// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional permanent-deletion capability.

use async_trait::async_trait;

use crate::error::ProvisionError;

/// Permanently deletes accounts. Only some platforms implement this.
#[async_trait]
pub trait UserRemoval: Send + Sync {
    async fn remove_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError>;
}
