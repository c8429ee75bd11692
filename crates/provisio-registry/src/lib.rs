// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform registry, adapter factory and the consumer entry point.
//!
//! Callers hold one [`PlatformRegistry`] for the process lifetime and drive
//! every lifecycle flow through [`perform_user_operation`].

pub mod factory;
pub mod registry;

pub use factory::AdapterFactory;
pub use registry::{PlatformEntry, PlatformInfo, PlatformRegistry};

use provisio_core::{OperationOutcome, OperationRequest, ProvisionError};
use tracing::{info, warn};

/// Runs one user-lifecycle operation against a platform.
///
/// Every failure comes back as a typed [`ProvisionError`]; nothing panics
/// across this boundary.
pub async fn perform_user_operation(
    registry: &PlatformRegistry,
    platform_id: &str,
    request: OperationRequest,
) -> Result<OperationOutcome, ProvisionError> {
    let operation = request.operation();
    match registry.execute(platform_id, request).await {
        Ok(outcome) => {
            info!(platform = %platform_id, %operation, "operation completed");
            Ok(outcome)
        }
        Err(e) => {
            warn!(
                platform = %platform_id,
                %operation,
                error = %e,
                retryable = e.is_retryable(),
                "operation failed"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use provisio_core::PlatformKind;
    use provisio_test_utils::{user, MockAdapter};
    use tracing_test::traced_test;

    use super::*;

    #[tokio::test]
    #[traced_test]
    async fn failures_are_logged_and_returned() {
        let registry = PlatformRegistry::new();
        let err = perform_user_operation(&registry, "chat", OperationRequest::List)
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::UnknownPlatform { .. }));
        assert!(logs_contain("operation failed"));
    }

    #[tokio::test]
    async fn success_returns_outcome() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(
            MockAdapter::new("chat", PlatformKind::Mattermost)
                .with_users(vec![user("u1", "ada", true)]),
        ));
        let outcome = perform_user_operation(
            &registry,
            "chat",
            OperationRequest::Lookup {
                username: "ada".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, OperationOutcome::UserId("u1".into()));
    }

    #[tokio::test]
    async fn missing_user_is_lookup_not_found() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(MockAdapter::new("chat", PlatformKind::Mattermost)));
        let err = perform_user_operation(
            &registry,
            "chat",
            OperationRequest::Lookup {
                username: "ghost".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProvisionError::LookupNotFound { .. }));
    }
}
