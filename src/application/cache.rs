//! In-memory recipe suggestion cache

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use crate::domain::planning::{CacheKey, Recipe};

use super::error::StageError;

/// Process-lifetime cache of recipe suggestions, keyed by the request's
/// [`CacheKey`].
///
/// Each key owns a once-cell, so concurrent identical requests await a
/// single in-flight computation instead of triggering duplicates. Failed
/// computations leave the cell empty and are retried on the next request.
pub struct RecipeCache {
    entries: DashMap<CacheKey, Arc<OnceCell<Arc<Vec<Recipe>>>>>,
    max_entries: Option<usize>,
}

impl RecipeCache {
    /// Create a cache with the given bound; `None` means unbounded
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    /// Create a cache with no eviction
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Return the cached recipes for `key`, computing them at most once.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<Vec<Recipe>>, StageError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Recipe>, StageError>>,
    {
        self.evict_if_full(&key);

        let cell = self
            .entries
            .entry(key)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if let Some(cached) = cell.get() {
            log::debug!("recipe cache hit");
            return Ok(Arc::clone(cached));
        }

        let recipes = cell
            .get_or_try_init(|| async {
                log::debug!("recipe cache miss, computing suggestions");
                compute().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(recipes))
    }

    /// Number of cached keys, including entries still being computed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a completed result exists for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries
            .get(key)
            .map(|cell| cell.get().is_some())
            .unwrap_or(false)
    }

    // Drop an arbitrary entry when inserting a new key would exceed the
    // bound. The bound is approximate under concurrent inserts, which is
    // acceptable for its leak-prevention purpose.
    fn evict_if_full(&self, key: &CacheKey) {
        let Some(max) = self.max_entries else {
            return;
        };
        if self.entries.contains_key(key) || self.entries.len() < max {
            return;
        }
        let victim = self.entries.iter().next().map(|entry| entry.key().clone());
        if let Some(victim) = victim {
            log::debug!("recipe cache full, evicting one entry");
            self.entries.remove(&victim);
        }
    }
}

impl Default for RecipeCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
