// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Budgetto category client.
//!
//! This crate provides the category data model, boundary validators, the
//! shared error type, and the traits behind which the identity provider and
//! the category REST API sit. Every other crate in the workspace builds on it.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::BudgettoError;
pub use traits::{CategoryApi, IdentityProvider};
pub use types::{
    AccessToken, Category, CategoryId, CreateCategoryInput, DeleteMessage, FieldError,
    SessionState, UpdateCategoryInput, UserProfile,
};
