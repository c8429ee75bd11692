// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process bridge to the MinIO client (`mc`).
//!
//! [`McRunner`] is the seam between the adapter and the operating system:
//! [`ProcessRunner`] spawns the real binary, tests substitute a recorder.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// One `mc` command line.
///
/// Arguments may carry secrets (`alias set`, `admin user add`), so `Debug`
/// only shows the command words.
#[derive(Clone, Default)]
pub struct McInvocation {
    /// Command words, e.g. `["admin", "user", "list"]`.
    pub command: Vec<&'static str>,
    /// Positional arguments following the command words.
    pub args: Vec<String>,
    /// Extra environment variables (e.g. `MC_HOST_<alias>`).
    pub env: Vec<(String, String)>,
}

impl McInvocation {
    /// Full argument vector: `--json`, the command words, then the arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once("--json".to_string())
            .chain(self.command.iter().map(|s| s.to_string()))
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Command words joined with spaces, safe for logs.
    pub fn describe(&self) -> String {
        self.command.join(" ")
    }
}

impl fmt::Debug for McInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McInvocation")
            .field("command", &self.describe())
            .field("args", &self.args.len())
            .field("env", &self.env.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// Captured result of a finished `mc` process.
#[derive(Debug, Clone, Default)]
pub struct McOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Why an `mc` process produced no output.
#[derive(Debug, Error)]
pub enum BridgeFailure {
    #[error("failed to spawn mc: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("mc did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Runs `mc` command lines.
#[async_trait]
pub trait McRunner: Send + Sync + 'static {
    async fn run(&self, invocation: &McInvocation) -> Result<McOutput, BridgeFailure>;
}

/// Spawns the `mc` binary with a fixed per-command timeout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl McRunner for ProcessRunner {
    async fn run(&self, invocation: &McInvocation) -> Result<McOutput, BridgeFailure> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(invocation.argv())
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!(program = %self.program.display(), command = %invocation.describe(), "running mc");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| BridgeFailure::TimedOut(self.timeout))??;

        Ok(McOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
