// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for category page flows.
//!
//! `CategoryHarness` wires a [`CategoryPage`] to a [`MockCategoryApi`] and a
//! [`MockIdentity`], keeping typed handles to both mocks for assertions. The
//! mock service draws its tokens from the same identity the page uses.

use std::sync::Arc;

use budgetto_core::{BudgettoError, Category};
use budgetto_store::{CategoryPage, DialogContext, Notification};
use tokio::sync::Notify;

use crate::mock_api::MockCategoryApi;
use crate::mock_identity::MockIdentity;

/// Builder for [`CategoryHarness`].
pub struct CategoryHarnessBuilder {
    categories: Vec<Category>,
    gated: bool,
    identity: MockIdentity,
}

impl CategoryHarnessBuilder {
    fn new() -> Self {
        Self {
            categories: Vec::new(),
            gated: false,
            identity: MockIdentity::signed_in(),
        }
    }

    /// Seed the mock server with categories.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Hold each service call until [`CategoryHarness::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Start without a session.
    pub fn signed_out(mut self) -> Self {
        self.identity = MockIdentity::signed_out();
        self
    }

    pub fn build(self) -> CategoryHarness {
        let gate = self.gated.then(|| Arc::new(Notify::new()));
        let identity = Arc::new(self.identity);
        let api = MockCategoryApi::with_categories(self.categories).with_identity(identity.clone());
        let api = Arc::new(match &gate {
            Some(gate) => api.gated(Arc::clone(gate)),
            None => api,
        });
        let ctx = DialogContext::new(api.clone(), identity.clone());

        CategoryHarness {
            api,
            identity,
            page: CategoryPage::new(ctx),
            gate,
        }
    }
}

/// A category page backed by mocks.
pub struct CategoryHarness {
    pub api: Arc<MockCategoryApi>,
    pub identity: Arc<MockIdentity>,
    pub page: CategoryPage,
    gate: Option<Arc<Notify>>,
}

impl CategoryHarness {
    pub fn builder() -> CategoryHarnessBuilder {
        CategoryHarnessBuilder::new()
    }

    pub fn ctx(&self) -> &DialogContext {
        self.page.context()
    }

    /// Loads the page once so the cache holds the seeded list.
    pub async fn loaded(self) -> Result<Self, BudgettoError> {
        self.page.load().await?;
        Ok(self)
    }

    /// Lets one held service call proceed. No-op when not gated.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Notifications published since the last drain.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.ctx().toasts.drain().await
    }
}
