// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every platform implements [`PlatformAdapter`]. Permanent deletion is an
//! optional extension exposed through [`UserRemoval`]. Both use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod removal;

pub use adapter::PlatformAdapter;
pub use removal::UserRemoval;
