//! Recently viewed products.
//!
//! [`RecentlyViewed`] keeps a most-recent-first list of product ids with no
//! duplicates and at most `capacity` entries. It reads its list from a
//! [`KeyValueStore`] once when loaded and writes it back after every
//! [`RecentlyViewed::record_view`].
//!
//! Storage problems never reach the caller: an unreadable or corrupt payload
//! loads as an empty history, and a failed write leaves the in-memory list
//! updated.

use crate::catalog::{Catalog, Product};
use crate::storage::KeyValueStore;
use crate::types::ProductId;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// Storage key holding the serialized id list.
pub const STORAGE_KEY: &str = "recently_viewed";

/// Most-recent-first product history backed by a key-value store.
#[derive(Debug)]
pub struct RecentlyViewed<S> {
    store: S,
    ids: Vec<ProductId>,
    capacity: usize,
}

impl<S: KeyValueStore> RecentlyViewed<S> {
    /// Load the history from `store`.
    ///
    /// A missing key, an unavailable store, or an unparsable payload all
    /// yield an empty history. Duplicate ids keep their first (most recent)
    /// position and the list is truncated to `capacity`. A capacity of zero
    /// is treated as one.
    pub fn load(store: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut ids = match store.get(STORAGE_KEY) {
            Ok(Some(payload)) => serde_json::from_str::<Vec<ProductId>>(&payload)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Discarding unparsable recently viewed payload");
                    Vec::new()
                }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Recently viewed storage unavailable, starting empty");
                Vec::new()
            }
        };

        dedup_keep_first(&mut ids);
        ids.truncate(capacity);

        Self {
            store,
            ids,
            capacity,
        }
    }

    /// Record that `product_id` was just viewed.
    ///
    /// Moves the id to the front (inserting it if new), evicts the oldest
    /// entries beyond capacity, then persists the list.
    pub fn record_view(&mut self, product_id: ProductId) {
        self.ids.retain(|&id| id != product_id);
        self.ids.insert(0, product_id);
        self.ids.truncate(self.capacity);
        self.persist();
    }

    /// Ids in most-recent-first order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Maximum number of ids kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether nothing has been viewed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the history against `catalog` in stored order.
    ///
    /// Ids no longer in the catalog are skipped.
    #[must_use]
    pub fn viewed_products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.resolve(&self.ids)
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.ids) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize recently viewed list");
                return;
            }
        };

        if let Err(e) = self.store.set(STORAGE_KEY, payload) {
            tracing::warn!(error = %e, "Failed to persist recently viewed list");
        }
    }
}

fn dedup_keep_first(ids: &mut Vec<ProductId>) {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(*id));
}
