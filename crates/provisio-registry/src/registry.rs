// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform registry and operation dispatcher.
//!
//! The `PlatformRegistry` stores one entry per configured platform id. An
//! entry is either a constructed adapter or the reason its construction
//! failed; an unavailable platform never blocks the others.

use std::collections::BTreeMap;

use provisio_config::ProvisioConfig;
use provisio_core::{
    HealthStatus, Operation, OperationOutcome, OperationRequest, PlatformAdapter, PlatformKind,
    ProvisionError, UserRecord,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::factory::AdapterFactory;

/// A registered platform.
pub enum PlatformEntry {
    /// The adapter was constructed and accepts operations.
    Available(Box<dyn PlatformAdapter>),
    /// Construction failed; every operation returns `Unavailable`.
    Unavailable { kind: PlatformKind, reason: String },
}

impl PlatformEntry {
    pub fn kind(&self) -> PlatformKind {
        match self {
            Self::Available(adapter) => adapter.kind(),
            Self::Unavailable { kind, .. } => *kind,
        }
    }
}

impl std::fmt::Debug for PlatformEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(adapter) => f
                .debug_struct("Available")
                .field("platform_id", &adapter.platform_id())
                .field("kind", &adapter.kind())
                .finish(),
            Self::Unavailable { kind, reason } => f
                .debug_struct("Unavailable")
                .field("kind", kind)
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Summary of one platform for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub id: String,
    pub kind: PlatformKind,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub capabilities: Vec<Operation>,
}

/// Registry of platform adapters keyed by platform id.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    entries: BTreeMap<String, PlatformEntry>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured platform.
    ///
    /// Construction failures are logged and recorded as unavailable entries.
    pub async fn from_config(config: &ProvisioConfig) -> Self {
        let factory = AdapterFactory::from_config(config);
        let mut registry = Self::new();

        for platform in &config.platforms {
            match factory.build(platform).await {
                Ok(adapter) => registry.register(adapter),
                Err(e) => {
                    error!(platform = %platform.id, kind = %platform.kind, error = %e, "adapter construction failed");
                    registry.register_unavailable(&platform.id, platform.kind, e.to_string());
                }
            }
        }

        info!(
            platforms = registry.len(),
            available = registry.available_count(),
            "platform registry ready"
        );
        registry
    }

    /// Register a constructed adapter under its own platform id.
    ///
    /// A second adapter with the same id replaces the first.
    pub fn register(&mut self, adapter: Box<dyn PlatformAdapter>) {
        let id = adapter.platform_id().to_string();
        debug!(platform = %id, kind = %adapter.kind(), "adapter registered");
        self.entries.insert(id, PlatformEntry::Available(adapter));
    }

    /// Record a platform whose adapter could not be constructed.
    pub fn register_unavailable(&mut self, id: &str, kind: PlatformKind, reason: impl Into<String>) {
        self.entries.insert(
            id.to_string(),
            PlatformEntry::Unavailable {
                kind,
                reason: reason.into(),
            },
        );
    }

    /// Resolve an available adapter.
    pub fn get(&self, platform_id: &str) -> Result<&dyn PlatformAdapter, ProvisionError> {
        match self.entries.get(platform_id) {
            Some(PlatformEntry::Available(adapter)) => Ok(adapter.as_ref()),
            Some(PlatformEntry::Unavailable { reason, .. }) => Err(ProvisionError::Unavailable {
                platform: platform_id.to_string(),
                reason: reason.clone(),
            }),
            None => Err(ProvisionError::UnknownPlatform {
                platform: platform_id.to_string(),
            }),
        }
    }

    /// Route one operation to its platform.
    ///
    /// Operations missing from the adapter's capabilities are rejected with
    /// `UnsupportedOperation` before the adapter is called.
    pub async fn execute(
        &self,
        platform_id: &str,
        request: OperationRequest,
    ) -> Result<OperationOutcome, ProvisionError> {
        let adapter = self.get(platform_id)?;
        let operation = request.operation();

        if !adapter.supports(operation) {
            warn!(platform = %platform_id, %operation, "operation not supported");
            return Err(ProvisionError::unsupported(platform_id, operation));
        }
        debug!(platform = %platform_id, %operation, "dispatching operation");

        match request {
            OperationRequest::Create(user) => {
                adapter.create_user(&user).await.map(OperationOutcome::Created)
            }
            OperationRequest::Block { id, username } => adapter
                .block_user(&id, &username)
                .await
                .map(OperationOutcome::Applied),
            OperationRequest::Unblock { id, username } => adapter
                .unblock_user(&id, &username)
                .await
                .map(OperationOutcome::Applied),
            OperationRequest::Remove { id, username } => match adapter.removal() {
                Some(removal) => removal
                    .remove_user(&id, &username)
                    .await
                    .map(OperationOutcome::Applied),
                None => Err(ProvisionError::unsupported(platform_id, operation)),
            },
            OperationRequest::Lookup { username } => adapter
                .get_user_id(&username)
                .await
                .map(OperationOutcome::UserId),
            OperationRequest::List => adapter.get_users().await.map(OperationOutcome::Users),
        }
    }

    /// List users on every available platform.
    ///
    /// Each platform keeps its own result; unavailable platforms report
    /// their construction failure.
    pub async fn list_all(&self) -> BTreeMap<String, Result<Vec<UserRecord>, ProvisionError>> {
        let mut results = BTreeMap::new();
        for (id, entry) in &self.entries {
            let result = match entry {
                PlatformEntry::Available(adapter) if adapter.supports(Operation::List) => {
                    adapter.get_users().await
                }
                PlatformEntry::Available(_) => Err(ProvisionError::unsupported(id, Operation::List)),
                PlatformEntry::Unavailable { reason, .. } => Err(ProvisionError::Unavailable {
                    platform: id.clone(),
                    reason: reason.clone(),
                }),
            };
            if let Err(e) = &result {
                warn!(platform = %id, error = %e, "listing users failed");
            }
            results.insert(id.clone(), result);
        }
        results
    }

    /// Run every available adapter's health check.
    pub async fn health(&self) -> BTreeMap<String, HealthStatus> {
        let mut statuses = BTreeMap::new();
        for (id, entry) in &self.entries {
            let status = match entry {
                PlatformEntry::Available(adapter) => adapter
                    .health_check()
                    .await
                    .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string())),
                PlatformEntry::Unavailable { reason, .. } => {
                    HealthStatus::Unhealthy(format!("adapter unavailable: {reason}"))
                }
            };
            statuses.insert(id.clone(), status);
        }
        statuses
    }

    /// Every registered platform, sorted by id.
    pub fn platforms(&self) -> Vec<PlatformInfo> {
        self.entries
            .iter()
            .map(|(id, entry)| match entry {
                PlatformEntry::Available(adapter) => PlatformInfo {
                    id: id.clone(),
                    kind: adapter.kind(),
                    available: true,
                    reason: None,
                    capabilities: adapter.capabilities().to_vec(),
                },
                PlatformEntry::Unavailable { kind, reason } => PlatformInfo {
                    id: id.clone(),
                    kind: *kind,
                    available: false,
                    reason: Some(reason.clone()),
                    capabilities: Vec::new(),
                },
            })
            .collect()
    }

    /// Number of adapters that were constructed successfully.
    pub fn available_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, PlatformEntry::Available(_)))
            .count()
    }

    /// Returns the number of registered platforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no platforms are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
