// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity provider backed by a pre-issued bearer token.
//!
//! The hosted login flow lives outside this client. `StaticIdentity` holds a
//! token obtained elsewhere (config file or `BUDGETTO_IDENTITY_TOKEN`) and
//! models the session flags around it: logging out or invalidating the
//! session stops token hand-out until `login_with_redirect` re-enables it.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use budgetto_config::model::IdentityConfig;
use budgetto_core::{AccessToken, BudgettoError, IdentityProvider, SessionState, UserProfile};
use tracing::{info, warn};

pub struct StaticIdentity {
    token: Option<AccessToken>,
    profile: UserProfile,
    authenticated: AtomicBool,
    return_to: String,
}

impl StaticIdentity {
    pub fn new(token: Option<AccessToken>, profile: UserProfile, return_to: String) -> Self {
        let authenticated = AtomicBool::new(token.is_some());
        Self {
            token,
            profile,
            authenticated,
            return_to,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        let profile = UserProfile {
            name: config.user_name.clone(),
            email: config.user_email.clone(),
            picture: None,
            nickname: config.user_name.clone(),
        };
        Self::new(
            config.token.as_deref().map(AccessToken::new),
            profile,
            config.return_to.clone(),
        )
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    fn session(&self) -> SessionState {
        let is_authenticated = self.is_authenticated();
        SessionState {
            is_authenticated,
            is_loading: false,
            user: is_authenticated.then(|| self.profile.clone()),
        }
    }

    async fn access_token(&self) -> Result<AccessToken, BudgettoError> {
        if !self.is_authenticated() {
            return Err(BudgettoError::auth("login required"));
        }
        self.token
            .clone()
            .ok_or_else(|| BudgettoError::auth("no identity token configured"))
    }

    async fn login_with_redirect(&self) -> Result<(), BudgettoError> {
        if self.token.is_none() {
            return Err(BudgettoError::auth(
                "no identity token configured; set identity.token or BUDGETTO_IDENTITY_TOKEN",
            ));
        }
        self.authenticated.store(true, Ordering::SeqCst);
        info!("session started");
        Ok(())
    }

    async fn logout(&self, return_to: Option<&str>) -> Result<(), BudgettoError> {
        self.authenticated.store(false, Ordering::SeqCst);
        let return_to = return_to.unwrap_or(&self.return_to);
        info!(return_to, "session ended");
        Ok(())
    }

    fn invalidate_session(&self) {
        if self.authenticated.swap(false, Ordering::SeqCst) {
            warn!("session invalidated after token failure");
        }
    }
}
