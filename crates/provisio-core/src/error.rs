// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Provisio platform adapter layer.

use thiserror::Error;

use crate::types::Operation;

/// The primary error type used across all adapter traits, the transport and
/// the dispatcher.
///
/// Every per-call failure is converted into one of these variants at the
/// adapter boundary. Payload contents are never embedded; only their size.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The platform could not be reached (connection error, timeout). The
    /// transport has already logged the cause.
    #[error("no response from platform `{platform}`")]
    NoResponse { platform: String },

    /// The platform answered with a non-success HTTP status.
    #[error("platform `{platform}` rejected the request with status {status}")]
    Rejected { platform: String, status: u16 },

    /// The adapter does not implement the requested capability.
    #[error("operation `{operation}` is not supported by platform `{platform}`")]
    UnsupportedOperation {
        platform: String,
        operation: Operation,
    },

    /// Username resolution returned zero matches.
    #[error("no user named `{username}` on platform `{platform}`")]
    LookupNotFound { platform: String, username: String },

    /// The platform returned a payload that does not have the expected shape.
    #[error("malformed response from platform `{platform}` ({payload_len} bytes): {reason}")]
    MalformedResponse {
        platform: String,
        payload_len: usize,
        reason: String,
    },

    /// The platform client could not be configured at construction time.
    #[error("failed to construct adapter for platform `{platform}`: {message}")]
    ConstructionFailure { platform: String, message: String },

    /// No adapter is registered under the given platform id.
    #[error("unknown platform `{platform}`")]
    UnknownPlatform { platform: String },

    /// The platform is configured but its adapter failed to construct.
    #[error("platform `{platform}` is unavailable: {reason}")]
    Unavailable { platform: String, reason: String },

    /// The object-storage admin CLI could not be run or exited with an error.
    #[error("admin bridge error on platform `{platform}`: {message}")]
    Bridge { platform: String, message: String },

    /// Invalid credential or configuration input.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProvisionError {
    /// Shorthand for [`ProvisionError::NoResponse`].
    pub fn no_response(platform: &str) -> Self {
        Self::NoResponse {
            platform: platform.to_string(),
        }
    }

    /// Shorthand for [`ProvisionError::UnsupportedOperation`].
    pub fn unsupported(platform: &str, operation: Operation) -> Self {
        Self::UnsupportedOperation {
            platform: platform.to_string(),
            operation,
        }
    }

    /// Shorthand for [`ProvisionError::MalformedResponse`].
    pub fn malformed(platform: &str, payload: &[u8], reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            platform: platform.to_string(),
            payload_len: payload.len(),
            reason: reason.into(),
        }
    }

    /// Returns true when repeating the same call later might succeed.
    ///
    /// Unsupported operations, failed lookups and malformed payloads are definite.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NoResponse { .. } => true,
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The platform id this error refers to, if any.
    pub fn platform(&self) -> Option<&str> {
        match self {
            Self::NoResponse { platform }
            | Self::Rejected { platform, .. }
            | Self::UnsupportedOperation { platform, .. }
            | Self::LookupNotFound { platform, .. }
            | Self::MalformedResponse { platform, .. }
            | Self::ConstructionFailure { platform, .. }
            | Self::UnknownPlatform { platform }
            | Self::Unavailable { platform, .. }
            | Self::Bridge { platform, .. } => Some(platform),
            Self::Config(_) => None,
        }
    }
}
