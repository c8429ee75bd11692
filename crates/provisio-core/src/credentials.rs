// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-platform credentials and authentication mode resolution.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Credentials for one platform, supplied by the caller at adapter construction.
///
/// Exactly one authentication mode is active; see [`PlatformCredentials::auth_mode`].
pub struct PlatformCredentials {
    pub base_url: String,
    pub api_token: SecretString,
    pub login_username: String,
    pub login_password: SecretString,
}

impl PlatformCredentials {
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        login_username: impl Into<String>,
        login_password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: SecretString::from(api_token.into()),
            login_username: login_username.into(),
            login_password: SecretString::from(login_password.into()),
        }
    }

    /// Bearer-token credentials with no login pair.
    pub fn bearer(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::new(base_url, api_token, "", "")
    }

    /// Basic-auth credentials with no token.
    pub fn basic(
        base_url: impl Into<String>,
        login_username: impl Into<String>,
        login_password: impl Into<String>,
    ) -> Self {
        Self::new(base_url, "", login_username, login_password)
    }

    /// Resolves the single active authentication mode.
    ///
    /// A non-empty token always wins, even when the login pair is also set.
    pub fn auth_mode(&self) -> AuthMode {
        let token = self.api_token.expose_secret();
        if token.is_empty() {
            AuthMode::Basic {
                username: self.login_username.clone(),
                password: SecretString::from(self.login_password.expose_secret().to_string()),
            }
        } else {
            AuthMode::Bearer(SecretString::from(token.to_string()))
        }
    }
}

impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformCredentials")
            .field("base_url", &self.base_url)
            .field("auth_mode", &self.auth_mode().label())
            .field("login_username", &self.login_username)
            .finish_non_exhaustive()
    }
}

/// The two mutually exclusive authentication strategies.
#[derive(Debug)]
pub enum AuthMode {
    /// `Authorization: Bearer <token>`.
    Bearer(SecretString),
    /// HTTP basic auth with the login pair.
    Basic {
        username: String,
        password: SecretString,
    },
}

impl AuthMode {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Bearer(_) => "bearer",
            AuthMode::Basic { .. } => "basic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_takes_precedence_over_login_pair() {
        let creds = PlatformCredentials::new("https://x", "tok-123", "admin", "secret");
        match creds.auth_mode() {
            AuthMode::Bearer(token) => assert_eq!(token.expose_secret(), "tok-123"),
            other => panic!("expected bearer, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_falls_back_to_basic() {
        let creds = PlatformCredentials::basic("https://x", "admin", "secret");
        match creds.auth_mode() {
            AuthMode::Basic { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password.expose_secret(), "secret");
            }
            other => panic!("expected basic, got {other:?}"),
        }
    }

    #[test]
    fn debug_hides_secrets() {
        let creds = PlatformCredentials::new("https://x", "tok-123", "admin", "pa55word");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("tok-123"));
        assert!(!debug.contains("pa55word"));
        assert!(debug.contains("bearer"));
    }
}
