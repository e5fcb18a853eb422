// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category model, request payloads, and identity session types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::BudgettoError;

/// Server-assigned category identifier.
pub type CategoryId = i64;

/// A category exactly as the REST API sends it.
///
/// Unknown keys are ignored; missing required keys or wrong types fail
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// A validated category.
///
/// `is_editable` is computed once at decode time from `created_by`: rows
/// without an owner are system defaults that cannot be edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord")]
pub struct Category {
    pub id: CategoryId,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
    pub note: Option<String>,
    pub created_by: Option<String>,
    #[serde(skip_serializing)]
    pub is_editable: bool,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = BudgettoError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(BudgettoError::Validation {
                message: format!("category {} has an empty name", record.id),
                fields: vec![FieldError::new("name", "name must not be empty")],
            });
        }

        let is_editable = record.created_by.is_some();
        Ok(Self {
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            name: record.name,
            note: record.note,
            created_by: record.created_by,
            is_editable,
        })
    }
}

impl Category {
    /// Note text with `null` flattened to an empty string, as forms expect it.
    pub fn note_or_empty(&self) -> &str {
        self.note.as_deref().unwrap_or_default()
    }
}

/// Form payload for creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub note: String,
}

/// Form payload for updating a category. `id` addresses the resource and is
/// not part of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCategoryInput {
    pub id: CategoryId,
    pub name: String,
    pub note: String,
}

/// JSON body sent on create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryPayload<'a> {
    pub name: &'a str,
    pub note: &'a str,
}

impl CreateCategoryInput {
    pub fn payload(&self) -> CategoryPayload<'_> {
        CategoryPayload {
            name: &self.name,
            note: &self.note,
        }
    }
}

impl UpdateCategoryInput {
    pub fn payload(&self) -> CategoryPayload<'_> {
        CategoryPayload {
            name: &self.name,
            note: &self.note,
        }
    }
}

/// Acknowledgement returned by `DELETE /v1/categories/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMessage {
    pub message: String,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error body the API attaches to 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// Profile of the signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub nickname: Option<String>,
}

/// Session flags exposed by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<UserProfile>,
}

/// Bearer token handed out by the identity provider.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Raw token value for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
