// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the two external collaborators: the identity provider and
//! the category REST API.
//!
//! Both use `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod category;
pub mod identity;

pub use category::CategoryApi;
pub use identity::IdentityProvider;
