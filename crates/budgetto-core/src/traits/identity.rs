// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity provider trait: token source and session flags.

use async_trait::async_trait;

use crate::error::BudgettoError;
use crate::types::{AccessToken, SessionState};

/// Source of bearer tokens and session state.
///
/// The client never implements the login protocol itself; it only asks the
/// provider for a token right before each request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session flags and user profile.
    fn session(&self) -> SessionState;

    /// Returns a bearer token, refreshing it silently if the provider can.
    async fn access_token(&self) -> Result<AccessToken, BudgettoError>;

    /// Starts the login flow.
    async fn login_with_redirect(&self) -> Result<(), BudgettoError>;

    /// Ends the session, optionally naming where the provider should return.
    async fn logout(&self, return_to: Option<&str>) -> Result<(), BudgettoError>;

    /// Marks the session as needing a fresh login after a token failure.
    fn invalidate_session(&self);
}
