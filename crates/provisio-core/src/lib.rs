// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Provisio platform adapter layer.
//!
//! This crate provides the error taxonomy, the canonical user record, the
//! credential model and the adapter traits every platform crate implements.

pub mod credentials;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use credentials::{AuthMode, PlatformCredentials};
pub use error::ProvisionError;
pub use traits::{PlatformAdapter, UserRemoval};
pub use types::{
    HealthStatus, NewUser, Operation, OperationOutcome, OperationRequest, PlatformKind,
    UserRecord,
};
