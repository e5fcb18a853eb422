// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock identity provider with scriptable session state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use budgetto_core::{AccessToken, BudgettoError, IdentityProvider, SessionState, UserProfile};

pub const MOCK_TOKEN: &str = "test-token";

/// Identity provider for tests.
///
/// Starts authenticated unless built with [`MockIdentity::signed_out`].
/// Counts `invalidate_session` calls so tests can assert on re-login prompts.
pub struct MockIdentity {
    authenticated: AtomicBool,
    token_fails: AtomicBool,
    invalidations: AtomicUsize,
}

impl MockIdentity {
    pub fn signed_in() -> Self {
        Self {
            authenticated: AtomicBool::new(true),
            token_fails: AtomicBool::new(false),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn signed_out() -> Self {
        let identity = Self::signed_in();
        identity.authenticated.store(false, Ordering::SeqCst);
        identity
    }

    /// Session stays authenticated but token requests fail.
    pub fn fail_tokens(&self) {
        self.token_fails.store(true, Ordering::SeqCst);
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl Default for MockIdentity {
    fn default() -> Self {
        Self::signed_in()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    fn session(&self) -> SessionState {
        let is_authenticated = self.authenticated.load(Ordering::SeqCst);
        SessionState {
            is_authenticated,
            is_loading: false,
            user: is_authenticated.then(|| UserProfile {
                name: Some("Test User".to_string()),
                email: Some("test@example.com".to_string()),
                picture: None,
                nickname: Some("tester".to_string()),
            }),
        }
    }

    async fn access_token(&self) -> Result<AccessToken, BudgettoError> {
        if !self.authenticated.load(Ordering::SeqCst) || self.token_fails.load(Ordering::SeqCst) {
            return Err(BudgettoError::auth("mock token unavailable"));
        }
        Ok(AccessToken::new(MOCK_TOKEN))
    }

    async fn login_with_redirect(&self) -> Result<(), BudgettoError> {
        self.authenticated.store(true, Ordering::SeqCst);
        self.token_fails.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn logout(&self, _return_to: Option<&str>) -> Result<(), BudgettoError> {
        self.authenticated.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn invalidate_session(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        self.authenticated.store(false, Ordering::SeqCst);
    }
}
