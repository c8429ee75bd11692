// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory platform adapter for deterministic testing.
//!
//! `MockAdapter` implements `PlatformAdapter` over a user list held in
//! memory, records every call it receives and can be told to fail the next
//! calls with a queued error.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use provisio_core::normalize::{first_match, split_display_name};
use provisio_core::{
    HealthStatus, NewUser, Operation, PlatformAdapter, PlatformKind, ProvisionError, UserRecord,
    UserRemoval,
};

/// Every operation, including removal.
pub const ALL_OPERATIONS: &[Operation] = &[
    Operation::Create,
    Operation::Block,
    Operation::Unblock,
    Operation::Remove,
    Operation::Lookup,
    Operation::List,
];

/// Everything except removal, the common REST adapter shape.
pub const WITHOUT_REMOVAL: &[Operation] = &[
    Operation::Create,
    Operation::Block,
    Operation::Unblock,
    Operation::Lookup,
    Operation::List,
];

/// A call observed by [`MockAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Health,
    Create { username: String },
    Block { id: String, username: String },
    Unblock { id: String, username: String },
    Remove { id: String, username: String },
    Lookup { username: String },
    List,
}

/// A mock platform adapter.
pub struct MockAdapter {
    platform_id: String,
    kind: PlatformKind,
    capabilities: &'static [Operation],
    health: HealthStatus,
    users: Arc<Mutex<Vec<UserRecord>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    failures: Arc<Mutex<VecDeque<ProvisionError>>>,
}

impl MockAdapter {
    /// Create a mock with every capability and no users.
    pub fn new(platform_id: &str, kind: PlatformKind) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            kind,
            capabilities: ALL_OPERATIONS,
            health: HealthStatus::Healthy,
            users: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Restrict the advertised capabilities.
    pub fn with_capabilities(mut self, capabilities: &'static [Operation]) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Seed the user list.
    pub fn with_users(self, users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            ..self
        }
    }

    /// Fixed result for `health_check`.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = health;
        self
    }

    /// Queue an error returned by the next call (any operation).
    pub async fn fail_next(&self, error: ProvisionError) {
        self.failures.lock().await.push_back(error);
    }

    /// Calls received so far, in order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().await.clone()
    }

    /// Current user list.
    pub async fn users(&self) -> Vec<UserRecord> {
        self.users.lock().await.clone()
    }

    /// Shared handle to the call log, usable after the adapter is boxed.
    pub fn call_log(&self) -> Arc<Mutex<Vec<MockCall>>> {
        Arc::clone(&self.calls)
    }

    async fn record(&self, call: MockCall) -> Result<(), ProvisionError> {
        debug!(platform = %self.platform_id, ?call, "mock call");
        self.calls.lock().await.push(call);
        match self.failures.lock().await.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn set_status(&self, id: &str, status: bool) -> bool {
        let mut users = self.users.lock().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.status = status;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl PlatformAdapter for MockAdapter {
    fn platform_id(&self) -> &str {
        &self.platform_id
    }

    fn kind(&self) -> PlatformKind {
        self.kind
    }

    fn capabilities(&self) -> &'static [Operation] {
        self.capabilities
    }

    fn removal(&self) -> Option<&dyn UserRemoval> {
        if self.supports(Operation::Remove) {
            Some(self)
        } else {
            None
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, ProvisionError> {
        self.record(MockCall::Health).await?;
        Ok(self.health.clone())
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, ProvisionError> {
        self.record(MockCall::Create {
            username: user.username.clone(),
        })
        .await?;
        let (first_name, last_name) = split_display_name(&user.display_name);
        let mut users = self.users.lock().await;
        let record = UserRecord {
            id: (users.len() + 1).to_string(),
            username: user.username.clone(),
            first_name,
            last_name,
            email: user.email.clone(),
            status: true,
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn block_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        self.record(MockCall::Block {
            id: id.to_string(),
            username: username.to_string(),
        })
        .await?;
        Ok(self.set_status(id, false).await)
    }

    async fn unblock_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        self.record(MockCall::Unblock {
            id: id.to_string(),
            username: username.to_string(),
        })
        .await?;
        Ok(self.set_status(id, true).await)
    }

    async fn get_user_id(&self, username: &str) -> Result<String, ProvisionError> {
        self.record(MockCall::Lookup {
            username: username.to_string(),
        })
        .await?;
        let matches: Vec<String> = self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| u.username == username)
            .map(|u| u.id.clone())
            .collect();
        first_match(&self.platform_id, username, matches)
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>, ProvisionError> {
        self.record(MockCall::List).await?;
        Ok(self.users().await)
    }
}

#[async_trait]
impl UserRemoval for MockAdapter {
    async fn remove_user(&self, id: &str, username: &str) -> Result<bool, ProvisionError> {
        self.record(MockCall::Remove {
            id: id.to_string(),
            username: username.to_string(),
        })
        .await?;
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// Convenience constructor for seeded users.
pub fn user(id: &str, username: &str, status: bool) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        username: username.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: format!("{username}@example.com"),
        status,
    }
}
