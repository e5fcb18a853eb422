// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory category service for deterministic testing.
//!
//! `MockCategoryApi` implements `CategoryApi` over a `Vec` of categories.
//! Failures can be queued ahead of time, and an optional gate holds every
//! call until the test releases it, which lets tests act while a request
//! is in flight. With an identity attached, every call first asks it for a
//! token and fails without reaching the list when that fails.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use budgetto_core::{
    BudgettoError, Category, CategoryApi, CategoryId, CreateCategoryInput, DeleteMessage,
    IdentityProvider, UpdateCategoryInput,
};

/// Owner recorded on categories the mock creates.
pub const MOCK_OWNER: &str = "mock|user";

const TIMESTAMP: &str = "2026-01-01T00:00:00Z";

/// Builds a category as the server would return it. `owner = None` makes a
/// non-editable default category.
pub fn category(id: CategoryId, name: &str, owner: Option<&str>) -> Category {
    Category {
        id,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
        name: name.to_string(),
        note: None,
        created_by: owner.map(str::to_string),
        is_editable: owner.is_some(),
    }
}

/// A call the mock received, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List,
    Get(CategoryId),
    Create(CreateCategoryInput),
    Update(UpdateCategoryInput),
    Delete(CategoryId),
}

struct MockState {
    items: Vec<Category>,
    next_id: CategoryId,
    failures: VecDeque<BudgettoError>,
    calls: Vec<MockCall>,
}

/// A mock category service backed by an in-memory list.
pub struct MockCategoryApi {
    state: Arc<Mutex<MockState>>,
    gate: Option<Arc<Notify>>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl MockCategoryApi {
    /// Create a mock with no categories.
    pub fn new() -> Self {
        Self::with_categories(Vec::new())
    }

    /// Create a mock pre-loaded with `items`, in server order.
    pub fn with_categories(items: Vec<Category>) -> Self {
        let next_id = items.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(Mutex::new(MockState {
                items,
                next_id,
                failures: VecDeque::new(),
                calls: Vec::new(),
            })),
            gate: None,
            identity: None,
        }
    }

    /// Hold every call until `gate` is notified once per call.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Fetch a token from `identity` before every call.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// The next call fails with `err` instead of touching the list.
    pub async fn fail_next(&self, err: BudgettoError) {
        self.state.lock().await.failures.push_back(err);
    }

    /// Every call received so far.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of list calls received.
    pub async fn list_calls(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|c| matches!(c, MockCall::List))
            .count()
    }

    /// The server-side list as it stands now.
    pub async fn items(&self) -> Vec<Category> {
        self.state.lock().await.items.clone()
    }

    /// Fetches a token, records the call, waits on the gate, then pops a
    /// queued failure. A token failure is returned before anything is recorded.
    async fn begin(&self, call: MockCall) -> Result<(), BudgettoError> {
        if let Some(identity) = &self.identity {
            identity.access_token().await?;
        }
        self.state.lock().await.calls.push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.state.lock().await.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockCategoryApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found() -> BudgettoError {
    BudgettoError::Http {
        status: 404,
        message: "Requested item was not found.".to_string(),
    }
}

#[async_trait]
impl CategoryApi for MockCategoryApi {
    async fn list(&self) -> Result<Vec<Category>, BudgettoError> {
        self.begin(MockCall::List).await?;
        Ok(self.items().await)
    }

    async fn get(&self, id: CategoryId) -> Result<Category, BudgettoError> {
        self.begin(MockCall::Get(id)).await?;
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, input: &CreateCategoryInput) -> Result<Category, BudgettoError> {
        self.begin(MockCall::Create(input.clone())).await?;
        let mut state = self.state.lock().await;
        let mut created = category(state.next_id, &input.name, Some(MOCK_OWNER));
        created.note = Some(input.note.clone());
        state.next_id += 1;
        state.items.insert(0, created.clone());
        Ok(created)
    }

    async fn update(&self, input: &UpdateCategoryInput) -> Result<Category, BudgettoError> {
        self.begin(MockCall::Update(input.clone())).await?;
        let mut state = self.state.lock().await;
        let existing = state
            .items
            .iter_mut()
            .find(|c| c.id == input.id)
            .ok_or_else(not_found)?;
        existing.name = input.name.clone();
        existing.note = Some(input.note.clone());
        Ok(existing.clone())
    }

    async fn delete(&self, id: CategoryId) -> Result<DeleteMessage, BudgettoError> {
        self.begin(MockCall::Delete(id)).await?;
        let mut state = self.state.lock().await;
        let before = state.items.len();
        state.items.retain(|c| c.id != id);
        if state.items.len() == before {
            return Err(not_found());
        }
        Ok(DeleteMessage {
            message: "Item deleted successfully".to_string(),
        })
    }
}
