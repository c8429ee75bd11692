// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./provisio.toml` > `~/.config/provisio/provisio.toml` > `/etc/provisio/provisio.toml`
//! with environment variable overrides via the `PROVISIO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::ProvisioConfig;

/// Scalar settings that may be overridden from the environment.
const ENV_KEYS: &[&str] = &["log_level", "http_request_timeout_secs", "minio_mc_path"];

/// Credential fields that may be overridden per platform.
const CREDENTIAL_FIELDS: &[&str] = &["api_token", "login_username", "login_password"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/provisio/provisio.toml` (system-wide)
/// 3. `~/.config/provisio/provisio.toml` (user XDG config)
/// 4. `./provisio.toml` (local directory)
/// 5. `PROVISIO_*` environment variables
pub fn load_config() -> Result<ProvisioConfig, figment::Error> {
    let mut config: ProvisioConfig = build_figment().extract()?;
    apply_credential_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ProvisioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProvisioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ProvisioConfig, figment::Error> {
    let mut config: ProvisioConfig = Figment::new()
        .merge(Serialized::defaults(ProvisioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()?;
    apply_credential_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ProvisioConfig::default()))
        .merge(Toml::file("/etc/provisio/provisio.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("provisio/provisio.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("provisio.toml"))
        .merge(env_provider())
}

/// Environment provider for the scalar settings.
///
/// Uses an allow-list plus `Env::map()` rather than `Env::split("_")`:
/// `PROVISIO_HTTP_REQUEST_TIMEOUT_SECS` must become `http.request_timeout_secs`,
/// and per-platform credential variables must not reach the extractor.
fn env_provider() -> Env {
    Env::prefixed("PROVISIO_").only(ENV_KEYS).map(|key| {
        let mapped = key
            .as_str()
            .replacen("log_", "log.", 1)
            .replacen("http_", "http.", 1)
            .replacen("minio_", "minio.", 1);
        mapped.into()
    })
}

/// Apply `PROVISIO_<ID>_<FIELD>` overrides to every configured platform.
///
/// `lookup` resolves an environment variable name; empty values are ignored.
pub fn apply_credential_overrides<F>(config: &mut ProvisioConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for platform in &mut config.platforms {
        for &field in CREDENTIAL_FIELDS {
            let name = platform.env_var(field);
            let Some(value) = lookup(&name).filter(|v| !v.is_empty()) else {
                continue;
            };
            debug!(platform = %platform.id, variable = %name, "credential overridden from environment");
            match field {
                "api_token" => platform.api_token = value,
                "login_username" => platform.login_username = value,
                _ => platform.login_password = value,
            }
        }
    }
}
