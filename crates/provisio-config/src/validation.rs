// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL shape, unique platform ids and credential presence.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::ProvisioConfig;

/// Accepted range for `http.request_timeout_secs`.
const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ProvisioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !TIMEOUT_RANGE.contains(&config.http.request_timeout_secs) {
        errors.push(ConfigError::Validation {
            message: format!(
                "http.request_timeout_secs must be between {} and {}, got {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end(),
                config.http.request_timeout_secs
            ),
        });
    }

    if config.minio.mc_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "minio.mc_path must not be empty".to_string(),
        });
    }

    let mut seen_ids = HashSet::new();
    for (i, platform) in config.platforms.iter().enumerate() {
        if platform.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("platforms[{i}].id must not be empty"),
            });
        } else if !seen_ids.insert(platform.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate platform id `{}` in [[platforms]] array",
                    platform.id
                ),
            });
        }

        match url::Url::parse(&platform.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => errors.push(ConfigError::Validation {
                message: format!(
                    "platforms[{i}].base_url `{}` must be an http or https URL (scheme `{}`)",
                    platform.base_url,
                    url.scheme()
                ),
            }),
            Err(e) => errors.push(ConfigError::Validation {
                message: format!(
                    "platforms[{i}].base_url `{}` is not a valid URL: {e}",
                    platform.base_url
                ),
            }),
        }

        if platform.api_token.is_empty() && platform.login_username.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!(
                    "platform `{}` needs either api_token or login_username (or set {} / {})",
                    platform.id,
                    platform.env_var("api_token"),
                    platform.env_var("login_username"),
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
