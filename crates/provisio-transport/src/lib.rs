// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated REST transport for Provisio platform adapters.
//!
//! [`RestTransport`] builds `base_url + endpoint`, sets
//! `Content-Type: application/json` and attaches either a bearer token or
//! HTTP basic credentials, never both. Network failures are logged and
//! reported as a `None` "no response" value instead of an error.

pub mod client;
pub mod response;

use strum::{Display, EnumString};

pub use client::{DEFAULT_TIMEOUT, RestTransport};
pub use response::RawResponse;

/// HTTP methods the transport issues.
///
/// Parsing any other tag fails, so an unknown method never reaches the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}
