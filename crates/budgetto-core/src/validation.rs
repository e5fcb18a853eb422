// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary validation for category inputs and API responses.
//!
//! Inputs are checked before they reach the network; response bodies are
//! decoded into typed values or rejected. Nothing is coerced.

use serde::de::DeserializeOwned;

use crate::error::BudgettoError;
use crate::types::{
    Category, CreateCategoryInput, DeleteMessage, FieldError, UpdateCategoryInput,
};

/// Message shown next to the name field when it is blank.
pub const INVALID_NAME_MESSAGE: &str = "Please input a valid name.";

/// Checks the name field of a category form.
pub fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        Some(FieldError::new("name", INVALID_NAME_MESSAGE))
    } else {
        None
    }
}

fn into_result(fields: Vec<FieldError>) -> Result<(), BudgettoError> {
    if fields.is_empty() {
        return Ok(());
    }
    let message = fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(BudgettoError::Validation { message, fields })
}

/// Validates a create payload.
pub fn validate_create(input: &CreateCategoryInput) -> Result<(), BudgettoError> {
    into_result(validate_name(&input.name).into_iter().collect())
}

/// Validates an update payload.
pub fn validate_update(input: &UpdateCategoryInput) -> Result<(), BudgettoError> {
    let mut fields: Vec<FieldError> = validate_name(&input.name).into_iter().collect();
    if input.id <= 0 {
        fields.push(FieldError::new("id", "id must be a positive integer"));
    }
    into_result(fields)
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, BudgettoError> {
    serde_json::from_str(body)
        .map_err(|e| BudgettoError::validation(format!("malformed {what} response: {e}")))
}

/// Decodes a single category response body.
pub fn parse_category(body: &str) -> Result<Category, BudgettoError> {
    decode(body, "category")
}

/// Decodes a category list response body. One malformed element rejects
/// the whole list.
pub fn parse_categories(body: &str) -> Result<Vec<Category>, BudgettoError> {
    decode(body, "category list")
}

/// Decodes the delete acknowledgement.
pub fn parse_delete_message(body: &str) -> Result<DeleteMessage, BudgettoError> {
    decode(body, "delete")
}
