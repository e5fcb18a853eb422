// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST client for the Budgetto category API.
//!
//! [`HttpCategoryService`] implements [`budgetto_core::CategoryApi`] on top of
//! [`ApiClient`], asking an [`budgetto_core::IdentityProvider`] for a fresh
//! bearer token before every request. [`StaticIdentity`] is the provider used
//! by the command-line front end.

pub mod categories;
pub mod client;
pub mod identity;

pub use categories::HttpCategoryService;
pub use client::ApiClient;
pub use identity::StaticIdentity;
