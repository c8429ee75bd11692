// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP executor shared by the REST adapters.
//!
//! Provides [`RestTransport`], which handles URL construction, the single
//! active authentication mode and the "no response" soft-failure contract.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use provisio_core::{AuthMode, PlatformCredentials, ProvisionError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::Method;
use crate::response::RawResponse;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated JSON-over-HTTP client for one platform.
///
/// Cloning is cheap: clones share the connection pool and the credentials.
/// No state is mutated after construction, so concurrent calls are safe.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    platform: Arc<str>,
    base_url: Arc<str>,
    auth: Arc<AuthMode>,
}

impl RestTransport {
    /// Creates a transport for `platform` with the default timeout.
    pub fn new(platform: &str, credentials: &PlatformCredentials) -> Result<Self, ProvisionError> {
        Self::with_timeout(platform, credentials, DEFAULT_TIMEOUT)
    }

    /// Creates a transport with an explicit per-request timeout.
    pub fn with_timeout(
        platform: &str,
        credentials: &PlatformCredentials,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ProvisionError::ConstructionFailure {
                platform: platform.to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let auth = credentials.auth_mode();
        debug!(platform, auth_mode = auth.label(), "transport configured");

        Ok(Self {
            client,
            platform: Arc::from(platform),
            base_url: Arc::from(credentials.base_url.trim_end_matches('/')),
            auth: Arc::new(auth),
        })
    }

    /// The platform id used in logs and errors.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// The authentication mode every request carries.
    pub fn auth_mode(&self) -> &AuthMode {
        &self.auth
    }

    /// GET with query parameters and an optional JSON body.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Option<RawResponse> {
        self.request(Method::Get, endpoint, body, query).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Option<RawResponse> {
        self.request(Method::Post, endpoint, body, &[]).await
    }

    pub async fn put(&self, endpoint: &str, body: Option<&Value>) -> Option<RawResponse> {
        self.request(Method::Put, endpoint, body, &[]).await
    }

    pub async fn delete(&self, endpoint: &str, body: Option<&Value>) -> Option<RawResponse> {
        self.request(Method::Delete, endpoint, body, &[]).await
    }

    /// Issues one request against `base_url + endpoint`.
    ///
    /// Query parameters only apply to GET. Returns `None` when the platform
    /// could not be reached; the cause is logged here and not propagated.
    /// Any HTTP answer, including error statuses, is `Some`.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Option<RawResponse> {
        let url = match self.url(endpoint, method, query) {
            Ok(url) => url,
            Err(e) => {
                warn!(platform = %self.platform, endpoint, error = %e, "invalid request URL");
                return None;
            }
        };

        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let builder = self.authenticate(builder);

        debug!(platform = %self.platform, %method, endpoint, "sending request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    platform = %self.platform,
                    %method,
                    endpoint,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    error = %e,
                    "request failed, no response"
                );
                return None;
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        match response.bytes().await {
            Ok(bytes) => {
                debug!(platform = %self.platform, %method, endpoint, status = status.as_u16(), "response received");
                Some(RawResponse::new(status, headers, bytes.to_vec()))
            }
            Err(e) => {
                warn!(
                    platform = %self.platform,
                    %method,
                    endpoint,
                    error = %e,
                    "failed to read response body, no response"
                );
                None
            }
        }
    }

    /// Like [`RestTransport::request`], but converts "no response" and
    /// non-success statuses into typed errors for adapter use.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<RawResponse, ProvisionError> {
        self.request(method, endpoint, body, query)
            .await
            .ok_or_else(|| ProvisionError::no_response(&self.platform))?
            .ensure_success(&self.platform)
    }

    fn url(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(&str, String)],
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if method == Method::Get && !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn authenticate(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.auth.as_ref() {
            AuthMode::Bearer(token) => builder.bearer_auth(token.expose_secret()),
            AuthMode::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }
}

impl fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestTransport")
            .field("platform", &self.platform)
            .field("base_url", &self.base_url)
            .field("auth_mode", &self.auth.label())
            .finish_non_exhaustive()
    }
}
