// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

use std::io::{self, IsTerminal};

use provisio_core::{NewUser, OperationRequest, ProvisionError};
use provisio_registry::{perform_user_operation, PlatformRegistry};

use crate::output;
use crate::Commands;

/// Run one subcommand against the registry.
pub async fn run(command: Commands, registry: &PlatformRegistry) -> Result<(), ProvisionError> {
    match command {
        Commands::Platforms => {
            println!("{}", output::to_pretty(&registry.platforms()));
        }
        Commands::ListAll => {
            let results = registry.list_all().await;
            println!("{}", output::to_pretty(&output::list_all_json(&results)));
        }
        Commands::Health { summary, plain } => {
            let statuses = registry.health().await;
            if summary {
                let use_color = !plain && io::stdout().is_terminal();
                output::print_health_summary(&statuses, use_color);
            } else {
                println!("{}", output::to_pretty(&statuses));
            }
        }
        operation => {
            let (platform, request) = operation_request(operation, prompt_password)?;
            let outcome = perform_user_operation(registry, &platform, request).await?;
            println!("{}", output::to_pretty(&outcome));
        }
    }
    Ok(())
}

/// Translate a per-platform subcommand into the dispatcher's request type.
///
/// `prompt` supplies the password when `create` was given none.
pub fn operation_request<P>(
    command: Commands,
    prompt: P,
) -> Result<(String, OperationRequest), ProvisionError>
where
    P: FnOnce(&str) -> io::Result<String>,
{
    let pair = match command {
        Commands::List { platform } => (platform, OperationRequest::List),
        Commands::Lookup { platform, username } => (platform, OperationRequest::Lookup { username }),
        Commands::Create {
            platform,
            email,
            username,
            name,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt(&username)
                    .map_err(|e| ProvisionError::Config(format!("failed to read password: {e}")))?,
            };
            if password.is_empty() {
                return Err(ProvisionError::Config("password must not be empty".to_string()));
            }
            (
                platform,
                OperationRequest::Create(NewUser::new(email, username, name, password)),
            )
        }
        Commands::Block {
            platform,
            id,
            username,
        } => (platform, OperationRequest::Block { id, username }),
        Commands::Unblock {
            platform,
            id,
            username,
        } => (platform, OperationRequest::Unblock { id, username }),
        Commands::Remove {
            platform,
            id,
            username,
        } => (platform, OperationRequest::Remove { id, username }),
        Commands::Platforms | Commands::ListAll | Commands::Health { .. } => {
            return Err(ProvisionError::Config(
                "command does not target a single platform".to_string(),
            ));
        }
    };
    Ok(pair)
}

fn prompt_password(username: &str) -> io::Result<String> {
    rpassword::prompt_password(format!("Password for {username}: "))
}

#[cfg(test)]
mod tests {
    use provisio_core::{Operation, OperationOutcome, PlatformKind};
    use provisio_test_utils::{MockAdapter, WITHOUT_REMOVAL};
    use secrecy::ExposeSecret;

    use super::*;

    fn password_of(request: &OperationRequest) -> Option<String> {
        match request {
            OperationRequest::Create(user) => Some(user.password.expose_secret().to_string()),
            _ => None,
        }
    }

    fn create(password: Option<&str>) -> Commands {
        Commands::Create {
            platform: "chat".into(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            name: "Ada Lovelace".into(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn create_prompts_when_password_missing() {
        let (platform, request) =
            operation_request(create(None), |user| Ok(format!("typed-for-{user}"))).unwrap();
        assert_eq!(platform, "chat");
        assert_eq!(password_of(&request).as_deref(), Some("typed-for-ada"));
    }

    #[test]
    fn create_uses_given_password_without_prompt() {
        let (_, request) = operation_request(create(Some("given")), |_| {
            panic!("prompt must not run")
        })
        .unwrap();
        assert_eq!(password_of(&request).as_deref(), Some("given"));
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = operation_request(create(None), |_| Ok(String::new())).unwrap_err();
        assert!(matches!(err, ProvisionError::Config(_)));
    }

    #[test]
    fn remove_maps_to_remove_request() {
        let (platform, request) = operation_request(
            Commands::Remove {
                platform: "source-control".into(),
                id: "7".into(),
                username: "ada".into(),
            },
            |_| unreachable!(),
        )
        .unwrap();
        assert_eq!(platform, "source-control");
        assert_eq!(request.operation(), Operation::Remove);
    }

    #[tokio::test]
    async fn unsupported_remove_is_an_error_not_a_panic() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(
            MockAdapter::new("source-control", PlatformKind::Gitlab)
                .with_capabilities(WITHOUT_REMOVAL),
        ));
        let err = run(
            Commands::Remove {
                platform: "source-control".into(),
                id: "7".into(),
                username: "ada".into(),
            },
            &registry,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProvisionError::UnsupportedOperation { .. }));
    }

    #[tokio::test]
    async fn list_runs_through_dispatcher() {
        let mut registry = PlatformRegistry::new();
        registry.register(Box::new(MockAdapter::new("chat", PlatformKind::Mattermost)));
        let (platform, request) =
            operation_request(Commands::List { platform: "chat".into() }, |_| unreachable!())
                .unwrap();
        let outcome = perform_user_operation(&registry, &platform, request)
            .await
            .unwrap();
        assert_eq!(outcome, OperationOutcome::Users(Vec::new()));
    }
}
