// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provisio - user lifecycle operations across source-control, team-chat,
//! object-storage and container-registry platforms.
//!
//! This is the operator binary. It loads the configuration, builds the
//! platform registry and runs one command.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use provisio_registry::PlatformRegistry;

/// Provisio - provision and deprovision users across platforms.
#[derive(Parser, Debug)]
#[command(name = "provisio", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show configured platforms, their kind and availability.
    Platforms,
    /// List every user on one platform.
    List { platform: String },
    /// List users on every available platform.
    ListAll,
    /// Resolve a username to the platform's user id.
    Lookup { platform: String, username: String },
    /// Create a user account.
    Create {
        platform: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Display name ("First Last").
        #[arg(long)]
        name: String,
        /// Initial password; prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Block (disable) a user.
    Block {
        platform: String,
        id: String,
        username: String,
    },
    /// Unblock (re-enable) a user.
    Unblock {
        platform: String,
        id: String,
        username: String,
    },
    /// Permanently remove a user.
    Remove {
        platform: String,
        id: String,
        username: String,
    },
    /// Run every platform's health check.
    Health {
        /// Print a colored summary instead of JSON.
        #[arg(long)]
        summary: bool,
        /// Disable colors in the summary.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => provisio_config::load_and_validate_path(path),
        None => provisio_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            provisio_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let registry = PlatformRegistry::from_config(&config).await;
    if let Err(e) = commands::run(cli.command, &registry).await {
        eprintln!("provisio: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("provisio={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
