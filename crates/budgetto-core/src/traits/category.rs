// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category service contract.

use async_trait::async_trait;

use crate::error::BudgettoError;
use crate::types::{Category, CategoryId, CreateCategoryInput, DeleteMessage, UpdateCategoryInput};

/// Read and write operations against the category collection.
///
/// Every method returns a validated, typed result. Implementations obtain a
/// fresh bearer token for each call and never cache it.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Fetches the full category list in server order.
    async fn list(&self) -> Result<Vec<Category>, BudgettoError>;

    /// Fetches a single category.
    async fn get(&self, id: CategoryId) -> Result<Category, BudgettoError>;

    /// Creates a category; the server assigns id, timestamps, and owner.
    async fn create(&self, input: &CreateCategoryInput) -> Result<Category, BudgettoError>;

    /// Updates name and note of the category addressed by `input.id`.
    async fn update(&self, input: &UpdateCategoryInput) -> Result<Category, BudgettoError>;

    /// Deletes a category.
    async fn delete(&self, id: CategoryId) -> Result<DeleteMessage, BudgettoError>;
}
