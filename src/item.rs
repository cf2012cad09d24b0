//! Cache item value object.
//!
//! A [`CacheItem`] is a read projection of the backend's current record
//! for a key, or a synthesized empty placeholder on miss. Items are built
//! fresh on every fetch and are never shared between calls.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::CacheRecord;
use crate::tags::merge_tags;

/// When a cache entry stops being served.
///
/// `Permanent` is the "never expires" sentinel; empty placeholder items
/// always carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Expiration {
    /// The entry never expires.
    #[default]
    Permanent,
    /// The entry expires at the given instant.
    At(DateTime<Utc>),
}

impl Expiration {
    /// Build an expiration `duration` from now, or `Permanent` for `None`.
    pub fn after(duration: Option<Duration>) -> Self {
        match duration {
            Some(d) => Self::At(Utc::now() + d),
            None => Self::Permanent,
        }
    }

    /// Returns true for the never-expires sentinel.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent)
    }

    /// The absolute expiration instant, or `None` for `Permanent`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Permanent => None,
            Self::At(at) => Some(*at),
        }
    }
}

/// A single named, tagged, expiring cache value.
///
/// Immutable after construction except for value/expiration updates ahead
/// of a save, and tag growth. `hit` and `valid` are captured at
/// construction and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheItem {
    key: String,
    value: Option<Value>,
    expiration: Expiration,
    hit: bool,
    tags: BTreeSet<String>,
    valid: bool,
}

impl CacheItem {
    /// Build a caller-side item ready to be saved.
    ///
    /// Starts permanent, untagged, and not a hit; use the setters to
    /// adjust expiration and tags before saving.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            expiration: Expiration::Permanent,
            hit: false,
            tags: BTreeSet::new(),
            valid: true,
        }
    }

    /// Project a backend record into an item for `key`.
    pub fn from_record(key: impl Into<String>, record: CacheRecord) -> Self {
        Self {
            key: key.into(),
            value: record.value,
            expiration: record.expiration,
            hit: record.hit,
            tags: record.tags,
            valid: record.valid,
        }
    }

    /// The empty placeholder returned for a miss or a failed read.
    pub fn empty(key: impl Into<String>) -> Self {
        Self::from_record(key, CacheRecord::empty())
    }

    /// The item's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The payload, or `None` for the never-set sentinel state.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Replace the payload ahead of a save.
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Whether the value was found in the backend on construction.
    ///
    /// Always false for synthesized empty items.
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// The expiration carried by this item.
    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// The absolute expiration instant, or `None` if the item is permanent.
    pub fn expire_timestamp(&self) -> Option<DateTime<Utc>> {
        self.expiration.timestamp()
    }

    /// Set an absolute expiration; `None` resets to permanent.
    pub fn expires_at(&mut self, at: Option<DateTime<Utc>>) {
        self.expiration = match at {
            Some(at) => Expiration::At(at),
            None => Expiration::Permanent,
        };
    }

    /// Set an expiration relative to now; `None` resets to permanent.
    pub fn expires_after(&mut self, duration: Option<Duration>) {
        self.expiration = Expiration::after(duration);
    }

    /// Union `new_tags` into the item's tag set.
    pub fn add_tags<I>(&mut self, new_tags: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        merge_tags(&mut self.tags, new_tags);
    }

    /// The item's current tag set.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Validity flag captured at construction.
    ///
    /// False means the backend considers the entry stale or invalidated;
    /// such items are only ever seen by callers who fetched with
    /// `allow_invalid`.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}
