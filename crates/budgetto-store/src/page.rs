// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The category page: cached list, row actions, and the three dialogs.

use std::sync::Arc;

use budgetto_core::{BudgettoError, Category, CategoryId};
use thiserror::Error;
use tracing::{debug, info};

use crate::dialog::{CreateDialog, DeleteDialog, DialogContext, UpdateDialog};
use crate::form::CategoryForm;
use crate::mode::CategoryMode;

/// Why a row action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageActionError {
    #[error("category {0} is not in the loaded list")]
    UnknownCategory(CategoryId),

    #[error("category {0} is a default category and cannot be changed")]
    NotEditable(CategoryId),
}

pub struct CategoryPage {
    ctx: DialogContext,
    pub create: CreateDialog,
    pub update: UpdateDialog,
    pub delete: DeleteDialog,
}

impl CategoryPage {
    pub fn new(ctx: DialogContext) -> Self {
        Self {
            create: CreateDialog::new(ctx.clone()),
            update: UpdateDialog::new(ctx.clone()),
            delete: DeleteDialog::new(ctx.clone()),
            ctx,
        }
    }

    pub fn context(&self) -> &DialogContext {
        &self.ctx
    }

    /// Cached rows, fetching first if the list is missing or stale.
    pub async fn load(&self) -> Result<Vec<Arc<Category>>, BudgettoError> {
        self.require_session()?;
        let entry = self
            .ctx
            .cache
            .ensure_categories(self.ctx.api.as_ref())
            .await
            .inspect_err(|e| self.on_load_error(e))?;
        Ok(entry.items.clone())
    }

    /// Refetches the list regardless of cache state.
    pub async fn refresh(&self) -> Result<Vec<Arc<Category>>, BudgettoError> {
        self.require_session()?;
        let entry = self
            .ctx
            .cache
            .refresh_categories(self.ctx.api.as_ref())
            .await
            .inspect_err(|e| self.on_load_error(e))?;
        info!(count = entry.items.len(), "categories refreshed");
        Ok(entry.items.clone())
    }

    /// Rows currently in the cache, without fetching.
    pub fn rows(&self) -> Vec<Arc<Category>> {
        self.ctx.cache.categories()
    }

    pub fn open_create(&self, form: &mut CategoryForm) {
        form.reset();
        self.ctx.mode.set_mode(CategoryMode::Create);
    }

    /// Opens the update dialog for `id` and prefills `form` from it.
    pub fn open_update(
        &self,
        id: CategoryId,
        form: &mut CategoryForm,
    ) -> Result<Arc<Category>, PageActionError> {
        let target = self.editable_row(id)?;
        self.ctx.mode.set_mode(CategoryMode::Update(Arc::clone(&target)));
        self.update.prefill(form);
        Ok(target)
    }

    pub fn open_delete(&self, id: CategoryId) -> Result<Arc<Category>, PageActionError> {
        let target = self.editable_row(id)?;
        self.ctx.mode.set_mode(CategoryMode::Delete(Arc::clone(&target)));
        Ok(target)
    }

    fn editable_row(&self, id: CategoryId) -> Result<Arc<Category>, PageActionError> {
        let row = self
            .rows()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(PageActionError::UnknownCategory(id))?;
        if !row.is_editable {
            return Err(PageActionError::NotEditable(id));
        }
        Ok(row)
    }

    fn require_session(&self) -> Result<(), BudgettoError> {
        if self.ctx.identity.session().is_authenticated {
            Ok(())
        } else {
            debug!("category page requested without a session");
            Err(BudgettoError::auth("login required"))
        }
    }

    fn on_load_error(&self, err: &BudgettoError) {
        if err.is_auth() {
            self.ctx.identity.invalidate_session();
        }
    }
}
