// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing notifications raised by dialog flows.

use std::collections::VecDeque;

use strum::Display;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A titled message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// FIFO of pending notifications; the front end drains it after each action.
#[derive(Default)]
pub struct Toasts {
    queue: Mutex<VecDeque<Notification>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish(&self, notification: Notification) {
        self.queue.lock().await.push_back(notification);
    }

    /// Removes and returns everything published so far, oldest first.
    pub async fn drain(&self) -> Vec<Notification> {
        self.queue.lock().await.drain(..).collect()
    }

    pub async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drain_returns_in_publish_order_and_empties() {
        let toasts = Toasts::new();
        toasts
            .publish(Notification::success("Created successfully", "a"))
            .await;
        toasts.publish(Notification::error("Delete failed", "b")).await;

        let drained = toasts.drain().await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, NotificationKind::Success);
        assert_eq!(drained[1].description, "b");
        assert!(toasts.is_empty().await);
    }
}
