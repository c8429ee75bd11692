// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Provisio.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::fmt;
use std::time::Duration;

use provisio_core::{PlatformCredentials, PlatformKind};
use serde::{Deserialize, Serialize};

/// Top-level Provisio configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisioConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Outbound HTTP settings shared by every REST adapter.
    #[serde(default)]
    pub http: HttpConfig,

    /// MinIO client (`mc`) settings.
    #[serde(default)]
    pub minio: MinioConfig,

    /// One entry per configured platform instance.
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
}

impl ProvisioConfig {
    /// Finds a platform entry by id.
    pub fn platform(&self, id: &str) -> Option<&PlatformConfig> {
        self.platforms.iter().find(|p| p.id == id)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Fixed per-request timeout, also applied to each `mc` invocation.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// MinIO client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MinioConfig {
    /// Path or name of the `mc` binary.
    #[serde(default = "default_mc_path")]
    pub mc_path: String,
}

impl Default for MinioConfig {
    fn default() -> Self {
        Self {
            mc_path: default_mc_path(),
        }
    }
}

fn default_mc_path() -> String {
    "mc".to_string()
}

/// A single platform instance.
///
/// Set either `api_token` (bearer mode) or the login pair (basic mode). A
/// non-empty token wins when both are present.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Logical id used to address this platform (e.g. `source-control`).
    pub id: String,

    /// Which adapter serves this platform.
    pub kind: PlatformKind,

    /// Instance URL without API prefix.
    pub base_url: String,

    #[serde(default)]
    pub api_token: String,

    #[serde(default)]
    pub login_username: String,

    #[serde(default)]
    pub login_password: String,
}

impl PlatformConfig {
    /// Builds the credential set handed to the adapter.
    pub fn credentials(&self) -> PlatformCredentials {
        PlatformCredentials::new(
            self.base_url.clone(),
            self.api_token.clone(),
            self.login_username.clone(),
            self.login_password.clone(),
        )
    }

    /// Name of the environment variable overriding `field` for this platform,
    /// e.g. `PROVISIO_SOURCE_CONTROL_API_TOKEN`.
    pub fn env_var(&self, field: &str) -> String {
        credential_env_var(&self.id, field)
    }
}

/// `PROVISIO_<ID>_<FIELD>` with the id upper-cased and `-` replaced by `_`.
pub fn credential_env_var(id: &str, field: &str) -> String {
    format!(
        "PROVISIO_{}_{}",
        id.to_uppercase().replace('-', "_"),
        field.to_uppercase()
    )
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &str| if s.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("PlatformConfig")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("api_token", &redact(&self.api_token))
            .field("login_username", &self.login_username)
            .field("login_password", &redact(&self.login_password))
            .finish()
    }
}
