// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side state for the category page.
//!
//! - [`QueryCache`] holds fetched lists and patches them after mutations.
//! - [`ModeStore`] tracks which dialog is open.
//! - [`CreateDialog`], [`UpdateDialog`] and [`DeleteDialog`] run the
//!   submit flows and publish [`Notification`]s to [`Toasts`].
//! - [`CategoryPage`] ties them together behind row actions.
//!
//! Everything is constructed explicitly and shared through [`DialogContext`].

pub mod cache;
pub mod dialog;
pub mod form;
pub mod mode;
pub mod page;
pub mod toast;

pub use cache::{CacheEntry, PatchOutcome, QueryCache, QueryKey};
pub use dialog::{CreateDialog, DeleteDialog, DialogContext, SubmitOutcome, UpdateDialog};
pub use form::CategoryForm;
pub use mode::{CategoryMode, ModeSnapshot, ModeStore, ModeTag};
pub use page::{CategoryPage, PageActionError};
pub use toast::{Notification, NotificationKind, Toasts};
