// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which category dialog, if any, is open.
//!
//! The mode is a closed enum: `Update` and `Delete` carry their target, so a
//! target exists exactly when one of those dialogs is open. Any mode may
//! follow any other. Every transition bumps a generation counter that
//! in-flight submissions compare against to detect that the user moved on.

use std::sync::Arc;

use budgetto_core::Category;
use strum::{Display, EnumIter};
use tokio::sync::watch;
use tracing::debug;

/// Current UI mode for the category page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryMode {
    /// No dialog open.
    #[default]
    View,
    Create,
    Update(Arc<Category>),
    Delete(Arc<Category>),
}

/// Fieldless discriminant of [`CategoryMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ModeTag {
    View,
    Create,
    Update,
    Delete,
}

impl CategoryMode {
    pub fn tag(&self) -> ModeTag {
        match self {
            Self::View => ModeTag::View,
            Self::Create => ModeTag::Create,
            Self::Update(_) => ModeTag::Update,
            Self::Delete(_) => ModeTag::Delete,
        }
    }

    /// The category being edited or deleted.
    pub fn target(&self) -> Option<&Arc<Category>> {
        match self {
            Self::Update(target) | Self::Delete(target) => Some(target),
            Self::View | Self::Create => None,
        }
    }
}

/// A mode together with the generation it was set at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSnapshot {
    pub mode: CategoryMode,
    pub generation: u64,
}

/// Holder of the current [`CategoryMode`].
pub struct ModeStore {
    tx: watch::Sender<ModeSnapshot>,
}

impl Default for ModeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStore {
    /// Starts in `View` at generation 0.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ModeSnapshot::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        self.tx.borrow().clone()
    }

    pub fn mode(&self) -> CategoryMode {
        self.tx.borrow().mode.clone()
    }

    pub fn tag(&self) -> ModeTag {
        self.tx.borrow().mode.tag()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn target(&self) -> Option<Arc<Category>> {
        self.tx.borrow().mode.target().cloned()
    }

    /// Replaces the mode unconditionally and returns the new generation.
    pub fn set_mode(&self, next: CategoryMode) -> u64 {
        let tag = next.tag();
        self.tx.send_modify(|snapshot| {
            snapshot.mode = next;
            snapshot.generation += 1;
        });
        let generation = self.generation();
        debug!(mode = %tag, generation, "mode changed");
        generation
    }

    /// Receives every transition.
    pub fn subscribe(&self) -> watch::Receiver<ModeSnapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn target() -> Arc<Category> {
        Arc::new(Category {
            id: 4,
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
            name: "Fuel".into(),
            note: Some("car".into()),
            created_by: Some("user-1".into()),
            is_editable: true,
        })
    }

    fn mode_for(tag: ModeTag) -> CategoryMode {
        match tag {
            ModeTag::View => CategoryMode::View,
            ModeTag::Create => CategoryMode::Create,
            ModeTag::Update => CategoryMode::Update(target()),
            ModeTag::Delete => CategoryMode::Delete(target()),
        }
    }

    #[test]
    fn starts_in_view() {
        let store = ModeStore::new();
        assert_eq!(store.tag(), ModeTag::View);
        assert_eq!(store.generation(), 0);
        assert!(store.target().is_none());
    }

    #[test]
    fn every_transition_is_allowed() {
        for from in ModeTag::iter() {
            for to in ModeTag::iter() {
                let store = ModeStore::new();
                store.set_mode(mode_for(from));
                let generation = store.set_mode(mode_for(to));
                assert_eq!(store.tag(), to, "{from} -> {to}");
                assert_eq!(generation, 2);
            }
        }
    }

    #[test]
    fn target_present_only_in_update_and_delete() {
        for tag in ModeTag::iter() {
            let mode = mode_for(tag);
            let has_target = matches!(tag, ModeTag::Update | ModeTag::Delete);
            assert_eq!(mode.target().is_some(), has_target, "{tag}");
        }
    }

    #[test]
    fn setting_the_same_mode_still_bumps_generation() {
        let store = ModeStore::new();
        store.set_mode(CategoryMode::Create);
        store.set_mode(CategoryMode::Create);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn snapshot_pairs_mode_with_its_generation() {
        let store = ModeStore::new();
        let rounds = 500;

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for id in 1..=rounds {
                    let mut target = (*target()).clone();
                    target.id = id;
                    store.set_mode(CategoryMode::Update(Arc::new(target)));
                }
            });
            scope.spawn(|| {
                loop {
                    let snapshot = store.snapshot();
                    if let Some(target) = snapshot.mode.target() {
                        assert_eq!(target.id as u64, snapshot.generation);
                    }
                    if snapshot.generation == rounds as u64 {
                        break;
                    }
                }
            });
        });
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let store = ModeStore::new();
        let mut rx = store.subscribe();

        store.set_mode(CategoryMode::Delete(target()));
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.mode.tag(), ModeTag::Delete);
        assert_eq!(snapshot.mode.target().unwrap().name, "Fuel");
        assert_eq!(snapshot.generation, 1);
    }

    #[test]
    fn tags_render_lowercase() {
        assert_eq!(ModeTag::Update.to_string(), "update");
    }
}
