// SPDX-FileCopyrightText: 2026 Provisio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Provisio integration tests.
//!
//! - [`MockAdapter`] - in-memory platform with call recording and failure injection

pub mod mock_adapter;

pub use mock_adapter::{user, MockAdapter, MockCall, ALL_OPERATIONS, WITHOUT_REMOVAL};
