// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side query cache for server data.
//!
//! Entries are keyed by [`QueryKey`] and hold the last fetched list. After a
//! successful mutation the list is patched in place instead of refetched:
//!
//! - create prepends the new category,
//! - update replaces the element with the same id,
//! - delete removes the element with the given id.
//!
//! Patches are pure functions over the previous list. The cache swaps its
//! whole map atomically, so readers holding a snapshot never see a
//! half-applied patch.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use budgetto_core::{BudgettoError, Category, CategoryApi, CategoryId};
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Identifies a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum QueryKey {
    Categories,
}

/// One cached query result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub items: Vec<Arc<Category>>,
    /// Set when the list is known to diverge from the server; the next
    /// `ensure` refetches.
    pub stale: bool,
    /// Cache revision at which this entry was last written.
    pub revision: u64,
}

/// What a patch did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// The updated id was not in the list; the entry was marked stale.
    Missed,
    /// The key was never fetched; nothing to patch.
    NotCached,
}

/// `[A, B]` + created `C` -> `[C, A, B]`.
pub fn prepend_created(items: &[Arc<Category>], created: Arc<Category>) -> Vec<Arc<Category>> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(created);
    next.extend(items.iter().cloned());
    next
}

/// Replaces the element whose id matches `updated.id`. Every other element
/// keeps its `Arc`. Returns `None` when no element matches.
pub fn replace_updated(
    items: &[Arc<Category>],
    updated: Arc<Category>,
) -> Option<Vec<Arc<Category>>> {
    let index = items.iter().position(|c| c.id == updated.id)?;
    let mut next = items.to_vec();
    next[index] = updated;
    Some(next)
}

/// Drops the element with `id`; an absent id leaves the list as it was.
pub fn remove_deleted(items: &[Arc<Category>], id: CategoryId) -> Vec<Arc<Category>> {
    items.iter().filter(|c| c.id != id).cloned().collect()
}

/// The map and the revision it was committed at, swapped together.
#[derive(Debug, Default)]
struct CacheState {
    revision: u64,
    entries: HashMap<QueryKey, Arc<CacheEntry>>,
}

/// Shared cache of query results.
pub struct QueryCache {
    state: ArcSwap<CacheState>,
    revision: watch::Sender<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: ArcSwap::from_pointee(CacheState::default()),
            revision,
        }
    }

    /// Current entry for `key`, if it has been fetched.
    pub fn get(&self, key: QueryKey) -> Option<Arc<CacheEntry>> {
        self.state.load().entries.get(&key).cloned()
    }

    /// Cached categories, empty before the first fetch.
    pub fn categories(&self) -> Vec<Arc<Category>> {
        self.get(QueryKey::Categories)
            .map(|entry| entry.items.clone())
            .unwrap_or_default()
    }

    /// True when `key` is missing or stale.
    pub fn needs_fetch(&self, key: QueryKey) -> bool {
        self.get(key).is_none_or(|entry| entry.stale)
    }

    /// Latest revision number. Bumped on every write.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receives the revision number after each write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Stores a freshly fetched list, replacing any previous entry.
    pub fn store(&self, key: QueryKey, items: Vec<Category>) -> Arc<CacheEntry> {
        let items: Vec<Arc<Category>> = items.into_iter().map(Arc::new).collect();
        let mut stored: Arc<CacheEntry> = Arc::default();
        self.state.rcu(|state| {
            let entry = Arc::new(CacheEntry {
                items: items.clone(),
                stale: false,
                revision: state.revision + 1,
            });
            stored = Arc::clone(&entry);
            let mut entries = state.entries.clone();
            entries.insert(key, entry);
            CacheState {
                revision: state.revision + 1,
                entries,
            }
        });
        self.publish(stored.revision);
        debug!(key = %key, count = stored.items.len(), revision = stored.revision, "cache entry stored");
        stored
    }

    /// Marks `key` stale so the next `ensure` refetches it.
    pub fn invalidate(&self, key: QueryKey) {
        let outcome = self.patch(key, |entry| {
            Some(CacheEntry {
                items: entry.items.clone(),
                stale: true,
                revision: entry.revision,
            })
        });
        if outcome != PatchOutcome::NotCached {
            debug!(key = %key, "cache entry invalidated");
        }
    }

    /// Prepends a created category to the categories list.
    pub fn apply_created(&self, created: Category) -> PatchOutcome {
        let created = Arc::new(created);
        self.patch(QueryKey::Categories, |entry| {
            Some(CacheEntry {
                items: prepend_created(&entry.items, Arc::clone(&created)),
                stale: entry.stale,
                revision: entry.revision,
            })
        })
    }

    /// Replaces an updated category in the categories list.
    ///
    /// A miss leaves the list unchanged and marks the entry stale.
    pub fn apply_updated(&self, updated: Category) -> PatchOutcome {
        let id = updated.id;
        let updated = Arc::new(updated);
        let outcome = self.patch(QueryKey::Categories, |entry| {
            replace_updated(&entry.items, Arc::clone(&updated)).map(|items| CacheEntry {
                items,
                stale: entry.stale,
                revision: entry.revision,
            })
        });
        if outcome == PatchOutcome::Missed {
            warn!(id, "updated category not in cached list, marking stale");
        }
        outcome
    }

    /// Removes a deleted category from the categories list.
    pub fn apply_deleted(&self, id: CategoryId) -> PatchOutcome {
        self.patch(QueryKey::Categories, |entry| {
            Some(CacheEntry {
                items: remove_deleted(&entry.items, id),
                stale: entry.stale,
                revision: entry.revision,
            })
        })
    }

    /// Returns the cached categories, fetching them first when missing or stale.
    pub async fn ensure_categories(
        &self,
        api: &dyn CategoryApi,
    ) -> Result<Arc<CacheEntry>, BudgettoError> {
        match self.get(QueryKey::Categories) {
            Some(entry) if !entry.stale => Ok(entry),
            _ => self.refresh_categories(api).await,
        }
    }

    /// Always refetches the categories list.
    pub async fn refresh_categories(
        &self,
        api: &dyn CategoryApi,
    ) -> Result<Arc<CacheEntry>, BudgettoError> {
        let items = api.list().await?;
        Ok(self.store(QueryKey::Categories, items))
    }

    /// Read-copy-update of one entry. `f` returns the replacement, or `None`
    /// to keep the items and mark the entry stale. The revision is taken
    /// from the state being replaced, so commit order and revision order agree.
    fn patch<F>(&self, key: QueryKey, f: F) -> PatchOutcome
    where
        F: Fn(&CacheEntry) -> Option<CacheEntry>,
    {
        let mut outcome = PatchOutcome::NotCached;
        let mut committed = 0;
        self.state.rcu(|state| {
            let Some(entry) = state.entries.get(&key) else {
                outcome = PatchOutcome::NotCached;
                return Arc::clone(state);
            };
            let revision = state.revision + 1;
            let (patched, result) = match f(entry) {
                Some(patched) => (CacheEntry { revision, ..patched }, PatchOutcome::Applied),
                None => (
                    CacheEntry {
                        items: entry.items.clone(),
                        stale: true,
                        revision,
                    },
                    PatchOutcome::Missed,
                ),
            };
            outcome = result;
            committed = revision;
            let mut entries = state.entries.clone();
            entries.insert(key, Arc::new(patched));
            Arc::new(CacheState { revision, entries })
        });

        if outcome != PatchOutcome::NotCached {
            self.publish(committed);
        }
        outcome
    }

    fn publish(&self, revision: u64) {
        self.revision.send_if_modified(|current| {
            if revision > *current {
                *current = revision;
                true
            } else {
                false
            }
        });
    }
}
