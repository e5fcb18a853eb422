// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Budgetto client.

use thiserror::Error;

use crate::types::FieldError;

/// Generic notice shown when the server gives us nothing better to say.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong!";

/// The primary error type returned by the category service and its collaborators.
#[derive(Debug, Error)]
pub enum BudgettoError {
    /// A response or an input did not match the expected category shape.
    #[error("validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// The identity provider could not hand out a bearer token.
    #[error("authentication error: {message}")]
    Auth {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never reached the server (DNS, connect, timeout, TLS).
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid client configuration (base URL, headers).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BudgettoError {
    /// Shorthand for a validation error without per-field details.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Shorthand for an authentication error without an underlying cause.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the failure should send the user back through login.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// HTTP status of a server rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a user-facing notification.
    ///
    /// Server rejections carry the server's own message; network failures and
    /// internal errors collapse to a generic notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Auth { .. } => "Your session has expired. Please log in again.".to_string(),
            Self::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
