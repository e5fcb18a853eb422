// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Editable name/note fields shared by the create and update dialogs.

use budgetto_core::validation::validate_name;
use budgetto_core::{Category, CategoryId, CreateCategoryInput, FieldError, UpdateCategoryInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub note: String,
    errors: Vec<FieldError>,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing category; a null note becomes empty.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            note: category.note_or_empty().to_string(),
            errors: Vec::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.retain(|e| e.field != "name");
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Inline errors recorded by the last [`validate`](Self::validate).
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Re-runs local validation, replacing any recorded errors.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_name(&self.name).into_iter().collect();
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_create_input(&self) -> CreateCategoryInput {
        CreateCategoryInput {
            name: self.name.clone(),
            note: self.note.clone(),
        }
    }

    pub fn to_update_input(&self, id: CategoryId) -> UpdateCategoryInput {
        UpdateCategoryInput {
            id,
            name: self.name.clone(),
            note: self.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use budgetto_core::validation::INVALID_NAME_MESSAGE;

    use super::*;

    #[test]
    fn blank_name_records_inline_error() {
        let mut form = CategoryForm::new();
        form.set_name("   ");
        assert!(!form.validate());
        assert_eq!(form.field_error("name"), Some(INVALID_NAME_MESSAGE));
    }

    #[test]
    fn editing_name_clears_its_error() {
        let mut form = CategoryForm::new();
        form.validate();
        form.set_name("Food");
        assert!(form.errors().is_empty());
        assert!(form.validate());
    }

    #[test]
    fn prefill_flattens_null_note() {
        let category = Category {
            id: 8,
            created_at: String::new(),
            updated_at: String::new(),
            name: "Gifts".into(),
            note: None,
            created_by: Some("u".into()),
            is_editable: true,
        };
        let form = CategoryForm::from_category(&category);
        assert_eq!(form.name, "Gifts");
        assert_eq!(form.note, "");
        assert_eq!(form.to_update_input(8).id, 8);
    }
}
