// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw HTTP answers and their conversion into typed results.

use provisio_core::ProvisionError;
use provisio_core::normalize::parse_json;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Any HTTP answer from a platform, successful or not.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Passes 2xx answers through and turns everything else into
    /// [`ProvisionError::Rejected`].
    pub fn ensure_success(self, platform: &str) -> Result<Self, ProvisionError> {
        if self.status.is_success() {
            return Ok(self);
        }
        warn!(
            platform,
            status = self.status.as_u16(),
            body_len = self.body.len(),
            "platform rejected request"
        );
        Err(ProvisionError::Rejected {
            platform: platform.to_string(),
            status: self.status.as_u16(),
        })
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self, platform: &str) -> Result<T, ProvisionError> {
        parse_json(platform, &self.body)
    }

    /// A response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
