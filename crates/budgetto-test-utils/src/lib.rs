// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Budgetto integration tests.
//!
//! Provides mock collaborators and a page harness for fast, deterministic
//! tests without a running API server.
//!
//! # Components
//!
//! - [`MockCategoryApi`] - In-memory category service with scripted failures
//! - [`MockIdentity`] - Identity provider with controllable session state
//! - [`CategoryHarness`] - Category page wired to both mocks

pub mod harness;
pub mod mock_api;
pub mod mock_identity;

pub use harness::{CategoryHarness, CategoryHarnessBuilder};
pub use mock_api::{MOCK_OWNER, MockCall, MockCategoryApi, category};
pub use mock_identity::{MOCK_TOKEN, MockIdentity};
