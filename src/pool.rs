//! The item pool: fetch, store, invalidate, and batch-write cache items.
//!
//! The pool orchestrates item construction from backend responses, the
//! deferred-write queue, commit, and delegation of delete/clear to the
//! backend. Keys are validated before every backend interaction.
//!
//! # Error policy
//!
//! [`PoolError::InvalidKey`] is the only error public operations surface,
//! raised before any backend access. Backend failures degrade to `false`
//! results (or miss-shaped items for reads); the underlying error is
//! logged and kept on a diagnostic side channel, see
//! [`ItemPool::last_backend_error`].
//!
//! # Exclusion
//!
//! All operations take `&mut self`: the pool instance is the unit of
//! exclusion. Use one pool per logical unit of work, or put your own
//! locking around it.

use crate::backend::{CacheBackend, CacheWrite};
use crate::error::{BackendError, PoolResult};
use crate::item::CacheItem;
use crate::key::{validate_key, validate_keys};

/// A cache-item pool over a backend `B`.
///
/// Dropping the pool commits any remaining deferred items, so the
/// ordinary shutdown path never silently loses queued writes. A failed
/// drop-commit is logged, not panicked on.
pub struct ItemPool<B: CacheBackend> {
    backend: B,
    /// Items queued by `save_deferred`, in insertion order.
    deferred: Vec<CacheItem>,
    last_error: Option<BackendError>,
}

impl<B: CacheBackend> ItemPool<B> {
    /// Create a pool over `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            deferred: Vec::new(),
            last_error: None,
        }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of items waiting for the next commit.
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// The most recent backend error the pool swallowed, if any.
    pub fn last_backend_error(&self) -> Option<&BackendError> {
        self.last_error.as_ref()
    }

    /// Take and clear the most recent swallowed backend error.
    pub fn take_last_error(&mut self) -> Option<BackendError> {
        self.last_error.take()
    }

    /// Fetch the item for `key`.
    ///
    /// A fresh item is built on every call. Absence and backend failure
    /// are indistinguishable here: both return the empty placeholder
    /// (no value, `hit = false`, permanent, untagged, valid). With
    /// `allow_invalid`, entries the backend has invalidated are still
    /// returned, carrying `is_valid() == false`.
    ///
    /// # Errors
    ///
    /// Only `InvalidKey`, before any backend call.
    pub fn get_item(&mut self, key: &str, allow_invalid: bool) -> PoolResult<CacheItem> {
        validate_key(key)?;

        let item = match self.backend.get(key, allow_invalid) {
            Ok(Some(mut record)) => {
                record.hit = true;
                CacheItem::from_record(key, record)
            }
            Ok(None) => CacheItem::empty(key),
            Err(error) => {
                self.record_failure(error);
                CacheItem::empty(key)
            }
        };
        Ok(item)
    }

    /// Fetch items for every key, preserving input order.
    ///
    /// All keys are validated up front: one invalid key rejects the whole
    /// call before any backend access. Otherwise equivalent to
    /// [`get_item`](Self::get_item) per key.
    pub fn get_items(
        &mut self,
        keys: &[&str],
        allow_invalid: bool,
    ) -> PoolResult<Vec<(String, CacheItem)>> {
        validate_keys(keys.iter().copied())?;

        let mut collection = Vec::with_capacity(keys.len());
        for key in keys {
            collection.push((key.to_string(), self.get_item(key, allow_invalid)?));
        }
        Ok(collection)
    }

    /// Report whether `key` currently exists in the backend.
    ///
    /// Forces a commit of all deferred items first, so a just-buffered
    /// write is visible to the presence check. A backend failure reads as
    /// "does not exist".
    ///
    /// # Errors
    ///
    /// Only `InvalidKey`.
    pub fn has_item(&mut self, key: &str) -> PoolResult<bool> {
        validate_key(key)?;

        self.commit();

        let exists = match self.backend.get(key, false) {
            Ok(found) => found.is_some(),
            Err(error) => {
                self.record_failure(error);
                false
            }
        };
        Ok(exists)
    }

    /// Erase everything in the backend.
    ///
    /// Pending deferred items are discarded without being written: a
    /// clear wins over any pending save.
    pub fn clear(&mut self) -> bool {
        if !self.deferred.is_empty() {
            tracing::debug!(
                count = self.deferred.len(),
                "Discarding deferred items on clear"
            );
            self.deferred.clear();
        }

        match self.backend.delete_all() {
            Ok(()) => true,
            Err(error) => {
                self.record_failure(error);
                false
            }
        }
    }

    /// Delete one entry from the backend.
    pub fn delete_item(&mut self, key: &str) -> bool {
        match self.backend.delete(key) {
            Ok(()) => true,
            Err(error) => {
                self.record_failure(error);
                false
            }
        }
    }

    /// Delete a batch of entries from the backend.
    pub fn delete_items(&mut self, keys: &[String]) -> bool {
        match self.backend.delete_multiple(keys) {
            Ok(()) => true,
            Err(error) => {
                self.record_failure(error);
                false
            }
        }
    }

    /// Write one item to the backend immediately.
    pub fn save(&mut self, item: &CacheItem) -> bool {
        match self.backend.set(item.key(), CacheWrite::from(item)) {
            Ok(()) => true,
            Err(error) => {
                self.record_failure(error);
                false
            }
        }
    }

    /// Queue an item for the next commit. Queuing cannot fail.
    pub fn save_deferred(&mut self, item: CacheItem) -> bool {
        self.deferred.push(item);
        true
    }

    /// Flush the deferred queue to the backend as one bulk write.
    ///
    /// The queue is drained unconditionally: a failed bulk write loses
    /// the batch (the failure stays visible on the side channel). Later
    /// deferred saves for the same key win within one batch; the bulk
    /// write keeps first-occurrence ordering.
    pub fn commit(&mut self) -> bool {
        let queued = std::mem::take(&mut self.deferred);

        let mut writes: Vec<(String, CacheWrite)> = Vec::with_capacity(queued.len());
        for item in &queued {
            let write = CacheWrite::from(item);
            match writes.iter().position(|(key, _)| key == item.key()) {
                Some(pos) => writes[pos].1 = write,
                None => writes.push((item.key().to_string(), write)),
            }
        }

        tracing::debug!(count = writes.len(), "Committing deferred items");
        match self.backend.set_multiple(writes) {
            Ok(()) => true,
            Err(error) => {
                self.record_failure(error);
                false
            }
        }
    }

    /// Log a swallowed backend failure and keep it on the side channel.
    fn record_failure(&mut self, error: BackendError) {
        tracing::warn!(error = %error, "Backend operation failed");
        self.last_error = Some(error);
    }
}

impl<B: CacheBackend> Drop for ItemPool<B> {
    fn drop(&mut self) {
        if !self.deferred.is_empty() && !self.commit() {
            tracing::warn!("Deferred items lost in teardown commit");
        }
    }
}
