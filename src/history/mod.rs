//! Bounded, deduplicating, recency-ordered scan history.
//!
//! The whole history is stored as one JSON array under [`HISTORY_KEY`] and
//! rewritten on every mutation. Entries are unique by product code and kept
//! newest first; once [`HistoryCache::capacity`] is reached, inserting a new
//! code evicts the oldest entry.

pub mod store;

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::error::ScanError;
use crate::models::Product;
use crate::rating;

pub use store::{FileStore, KeyValueStore};
#[cfg(test)]
pub use store::MemoryStore;

pub const HISTORY_KEY: &str = "food-checkr-history";
pub const DEFAULT_CAPACITY: usize = 100;

pub struct HistoryCache<S: KeyValueStore> {
    store: S,
    capacity: usize,
    /// Newest first, timestamps strictly decreasing.
    entries: RwLock<Vec<Product>>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Load the history from `store`. A missing, empty or unreadable blob
    /// starts an empty history.
    pub fn open(store: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let entries = load(&store, capacity);
        Self {
            store,
            capacity,
            entries: RwLock::new(entries),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save `product` as the most recent entry, stamping a fresh timestamp.
    ///
    /// An existing entry with the same code is replaced in place of a new
    /// insertion and never triggers eviction. The in-memory history is updated
    /// even when the durable write fails; that failure is returned as
    /// [`ScanError::PersistFailed`].
    pub fn upsert(&self, mut product: Product) -> Result<(), ScanError> {
        let mut entries = self.write_entries();

        let now = chrono::Utc::now().timestamp_millis();
        product.timestamp = match entries.first() {
            Some(newest) if newest.timestamp >= now => newest.timestamp.saturating_add(1),
            _ => now,
        };

        match entries.iter().position(|p| p.code == product.code) {
            Some(index) => {
                tracing::debug!(code = %product.code, "refreshing history entry");
                entries.remove(index);
                entries.insert(0, product);
            }
            None => {
                entries.insert(0, product);
                if entries.len() > self.capacity {
                    if let Some(evicted) = entries.pop() {
                        tracing::debug!(code = %evicted.code, "evicted oldest history entry");
                    }
                }
            }
        }

        self.persist(&entries)
    }

    /// All entries, most recent first.
    pub fn list(&self) -> Vec<Product> {
        self.read_entries().clone()
    }

    pub fn get(&self, code: &str) -> Option<Product> {
        self.read_entries().iter().find(|p| p.code == code).cloned()
    }

    /// Delete the entry for `code`. Unknown codes are a no-op.
    pub fn remove(&self, code: &str) -> Result<(), ScanError> {
        let mut entries = self.write_entries();

        let before = entries.len();
        entries.retain(|p| p.code != code);
        if entries.len() == before {
            return Ok(());
        }

        self.persist(&entries)
    }

    pub fn clear(&self) -> Result<(), ScanError> {
        let mut entries = self.write_entries();
        entries.clear();

        self.store.delete(HISTORY_KEY).map_err(|e| {
            tracing::warn!(error = %e, "failed to delete history blob");
            ScanError::PersistFailed(e.to_string())
        })
    }

    fn persist(&self, entries: &[Product]) -> Result<(), ScanError> {
        let bytes = serde_json::to_vec(entries)
            .map_err(|e| ScanError::PersistFailed(format!("failed to serialize history: {}", e)))?;

        self.store.write(HISTORY_KEY, &bytes).map_err(|e| {
            tracing::warn!(error = %e, "failed to write history blob");
            ScanError::PersistFailed(e.to_string())
        })
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, Vec<Product>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load<S: KeyValueStore>(store: &S, capacity: usize) -> Vec<Product> {
    let bytes = match store.read(HISTORY_KEY) {
        Ok(Some(bytes)) if !bytes.is_empty() => bytes,
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read history, starting empty");
            return Vec::new();
        }
    };

    let mut entries: Vec<Product> = match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "history blob is corrupt, starting empty");
            return Vec::new();
        }
    };

    // Stable sort keeps stored order for equal timestamps.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = std::collections::HashSet::new();
    entries.retain(|p| seen.insert(p.code.clone()));
    entries.truncate(capacity);

    for product in &mut entries {
        let (rating, score) = rating::aggregate(&product.additives);
        product.rating = rating;
        product.rating_score = score;
    }

    entries
}
