//! Cache backend trait and the record types exchanged with it.
//!
//! The backend is the external collaborator that actually persists
//! records, tracks expiration, and resolves tag invalidation. The pool
//! only needs this narrow contract; how a backend stores bytes (files,
//! memory, a database) is its own business.
//!
//! # Error policy
//!
//! Backends report failures as [`BackendError`]. The pool swallows those
//! and degrades to boolean results or miss-shaped items, so backend
//! implementations should put anything worth diagnosing into the error's
//! `reason`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;
use crate::item::{CacheItem, Expiration};

/// The record shape a backend returns from [`CacheBackend::get`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// The stored payload, or `None` for a never-set entry.
    pub value: Option<Value>,
    /// Absolute expiration, or the permanent sentinel.
    pub expiration: Expiration,
    /// Tags attached to the entry.
    pub tags: BTreeSet<String>,
    /// Whether the value was actually found.
    pub hit: bool,
    /// Whether the backend still considers the entry valid.
    pub valid: bool,
}

impl CacheRecord {
    /// The miss shape: no value, permanent, untagged, valid, not a hit.
    pub fn empty() -> Self {
        Self {
            value: None,
            expiration: Expiration::Permanent,
            tags: BTreeSet::new(),
            hit: false,
            valid: true,
        }
    }
}

/// The record shape the pool sends to [`CacheBackend::set`] and
/// [`CacheBackend::set_multiple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheWrite {
    /// The payload to store.
    pub value: Option<Value>,
    /// Absolute expiration, or the permanent sentinel.
    pub expiration: Expiration,
    /// Tags to attach to the entry.
    pub tags: BTreeSet<String>,
}

impl From<&CacheItem> for CacheWrite {
    fn from(item: &CacheItem) -> Self {
        Self {
            value: item.value().cloned(),
            expiration: item.expiration(),
            tags: item.tags().clone(),
        }
    }
}

/// Contract for pluggable cache backends.
///
/// Implementations own expiry enforcement and tag-based invalidation;
/// the pool validates keys before every call, so backends may assume keys
/// are well-formed.
pub trait CacheBackend {
    /// Fetch the record for `key`.
    ///
    /// Returns `Ok(None)` when the key has never been set (or has been
    /// deleted). With `allow_invalid`, entries the backend has
    /// invalidated but not yet dropped are returned with `valid = false`
    /// instead of being treated as absent.
    fn get(&self, key: &str, allow_invalid: bool) -> Result<Option<CacheRecord>, BackendError>;

    /// Store one record.
    fn set(&mut self, key: &str, write: CacheWrite) -> Result<(), BackendError>;

    /// Store a batch of records in one operation.
    ///
    /// An empty batch is legal and should succeed without side effects.
    fn set_multiple(&mut self, writes: Vec<(String, CacheWrite)>) -> Result<(), BackendError>;

    /// Remove one entry.
    fn delete(&mut self, key: &str) -> Result<(), BackendError>;

    /// Remove a batch of entries.
    fn delete_multiple(&mut self, keys: &[String]) -> Result<(), BackendError>;

    /// Remove every entry.
    fn delete_all(&mut self) -> Result<(), BackendError>;
}
