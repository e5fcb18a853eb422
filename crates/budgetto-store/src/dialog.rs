// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Create, update, and delete dialog flows.
//!
//! A dialog is open exactly when the mode store's tag matches it. Submitting
//! validates the form, calls the category service, and on success patches
//! the cache, returns to `View`, clears the form and publishes a
//! notification. A failure leaves mode and cache alone and keeps the dialog
//! open.
//!
//! Each submission reads the open mode and its generation from one snapshot
//! when it starts. If the mode changed before the response arrived the
//! result is discarded; since the server may have committed it, the
//! categories entry is marked stale. An auth failure still ends the session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use budgetto_core::{BudgettoError, CategoryApi, FieldError, IdentityProvider};
use strum::Display;
use tracing::{debug, error};

use crate::cache::{QueryCache, QueryKey};
use crate::form::CategoryForm;
use crate::mode::{CategoryMode, ModeStore, ModeTag};
use crate::toast::{Notification, Toasts};

/// Shared collaborators handed to every dialog and the page.
#[derive(Clone)]
pub struct DialogContext {
    pub api: Arc<dyn CategoryApi>,
    pub identity: Arc<dyn IdentityProvider>,
    pub cache: Arc<QueryCache>,
    pub mode: Arc<ModeStore>,
    pub toasts: Arc<Toasts>,
}

impl DialogContext {
    pub fn new(api: Arc<dyn CategoryApi>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            api,
            identity,
            cache: Arc::new(QueryCache::new()),
            mode: Arc::new(ModeStore::new()),
            toasts: Arc::new(Toasts::new()),
        }
    }

    /// Applies a finished service call unless the mode moved on meanwhile.
    async fn settle<T>(
        &self,
        action: Action,
        generation: u64,
        result: Result<T, BudgettoError>,
        on_success: impl FnOnce(T) -> Notification,
    ) -> SubmitOutcome {
        if result.as_ref().is_err_and(BudgettoError::is_auth) {
            self.identity.invalidate_session();
        }

        if self.mode.generation() != generation {
            match &result {
                Ok(_) => {
                    debug!(action = %action, "mode changed while in flight, discarding result");
                    self.cache.invalidate(QueryKey::Categories);
                }
                Err(err) => {
                    debug!(action = %action, error = %err, "mode changed while in flight, dropping failure");
                }
            }
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(value) => {
                let notification = on_success(value);
                self.mode.set_mode(CategoryMode::View);
                self.toasts.publish(notification.clone()).await;
                SubmitOutcome::Completed(notification)
            }
            Err(err) => {
                error!(action = %action, error = %err, "category mutation failed");
                self.toasts
                    .publish(Notification::error(
                        action.failure_title(),
                        err.user_message(),
                    ))
                    .await;
                SubmitOutcome::Failed(err)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Display)]
#[strum(serialize_all = "lowercase")]
enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    fn failure_title(self) -> &'static str {
        match self {
            Self::Create => "Create failed",
            Self::Update => "Update failed",
            Self::Delete => "Delete failed",
        }
    }
}

/// Result of a submit or confirm.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The mutation succeeded; carries the notification that was published.
    Completed(Notification),
    /// Local validation failed; the service was not called.
    Invalid(Vec<FieldError>),
    /// The service call failed; the dialog stays open.
    Failed(BudgettoError),
    /// A submission from this dialog is already in flight.
    Busy,
    /// The dialog is not open.
    Closed,
    /// The mode changed before the response arrived.
    Discarded,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Default)]
struct BusyFlag(AtomicBool);

impl BusyFlag {
    fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(&self.0))
    }

    fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Clears the busy flag when the submission ends, including on cancellation.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Returns to `View` and clears the form, unless a submission is in flight.
fn close(ctx: &DialogContext, busy: &BusyFlag, tag: ModeTag, form: &mut CategoryForm) -> bool {
    if busy.is_set() || ctx.mode.tag() != tag {
        return false;
    }
    ctx.mode.set_mode(CategoryMode::View);
    form.reset();
    true
}

pub struct CreateDialog {
    ctx: DialogContext,
    busy: BusyFlag,
}

impl CreateDialog {
    pub fn new(ctx: DialogContext) -> Self {
        Self {
            ctx,
            busy: BusyFlag::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ctx.mode.tag() == ModeTag::Create
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    pub async fn submit(&self, form: &mut CategoryForm) -> SubmitOutcome {
        let opened = self.ctx.mode.snapshot();
        if opened.mode.tag() != ModeTag::Create {
            return SubmitOutcome::Closed;
        }
        let Some(_guard) = self.busy.try_acquire() else {
            return SubmitOutcome::Busy;
        };
        if !form.validate() {
            return SubmitOutcome::Invalid(form.errors().to_vec());
        }

        let result = self.ctx.api.create(&form.to_create_input()).await;
        let outcome = self
            .ctx
            .settle(Action::Create, opened.generation, result, |created| {
                let description = format!("category {} created successfully", created.name);
                self.ctx.cache.apply_created(created);
                Notification::success("Created successfully", description)
            })
            .await;
        if outcome.is_completed() {
            form.reset();
        }
        outcome
    }

    /// Closes the dialog. Ignored while a submission is in flight.
    pub fn cancel(&self, form: &mut CategoryForm) -> bool {
        close(&self.ctx, &self.busy, ModeTag::Create, form)
    }
}

pub struct UpdateDialog {
    ctx: DialogContext,
    busy: BusyFlag,
}

impl UpdateDialog {
    pub fn new(ctx: DialogContext) -> Self {
        Self {
            ctx,
            busy: BusyFlag::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ctx.mode.tag() == ModeTag::Update
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    /// Loads the target's current values into the form.
    pub fn prefill(&self, form: &mut CategoryForm) -> bool {
        match self.ctx.mode.mode() {
            CategoryMode::Update(target) => {
                *form = CategoryForm::from_category(&target);
                true
            }
            _ => false,
        }
    }

    pub async fn submit(&self, form: &mut CategoryForm) -> SubmitOutcome {
        let opened = self.ctx.mode.snapshot();
        let CategoryMode::Update(target) = opened.mode else {
            return SubmitOutcome::Closed;
        };
        let Some(_guard) = self.busy.try_acquire() else {
            return SubmitOutcome::Busy;
        };
        if !form.validate() {
            return SubmitOutcome::Invalid(form.errors().to_vec());
        }

        let result = self.ctx.api.update(&form.to_update_input(target.id)).await;
        let outcome = self
            .ctx
            .settle(Action::Update, opened.generation, result, |updated| {
                let description = format!("category {} updated successfully", updated.name);
                self.ctx.cache.apply_updated(updated);
                Notification::success("Updated successfully", description)
            })
            .await;
        if outcome.is_completed() {
            form.reset();
        }
        outcome
    }

    pub fn cancel(&self, form: &mut CategoryForm) -> bool {
        close(&self.ctx, &self.busy, ModeTag::Update, form)
    }
}

pub struct DeleteDialog {
    ctx: DialogContext,
    busy: BusyFlag,
}

impl DeleteDialog {
    pub fn new(ctx: DialogContext) -> Self {
        Self {
            ctx,
            busy: BusyFlag::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ctx.mode.tag() == ModeTag::Delete
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    /// Deletes the target captured when the confirmation starts.
    pub async fn confirm(&self) -> SubmitOutcome {
        let opened = self.ctx.mode.snapshot();
        let CategoryMode::Delete(target) = opened.mode else {
            return SubmitOutcome::Closed;
        };
        let Some(_guard) = self.busy.try_acquire() else {
            return SubmitOutcome::Busy;
        };

        let id = target.id;
        let result = self.ctx.api.delete(id).await;
        self.ctx
            .settle(Action::Delete, opened.generation, result, |ack| {
                self.ctx.cache.apply_deleted(id);
                Notification::success("Deleted successfully", ack.message)
            })
            .await
    }

    pub fn cancel(&self) -> bool {
        close(
            &self.ctx,
            &self.busy,
            ModeTag::Delete,
            &mut CategoryForm::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_flag_is_exclusive_and_released_on_drop() {
        let flag = BusyFlag::default();
        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_set());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_set());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn failure_titles_name_the_action() {
        assert_eq!(Action::Delete.failure_title(), "Delete failed");
        assert_eq!(Action::Update.to_string(), "update");
    }
}
