//! tagpool - a cache-item pool over a pluggable tag-aware backend.
//!
//! This crate implements the pool side of a standard cache-pool contract:
//! named, validated keys; item lifecycle (hit/miss/expired/invalid);
//! deferred writes flushed as one bulk operation; and tag plumbing for
//! group invalidation. The storage engine itself is an external
//! collaborator behind the [`CacheBackend`] trait - the pool does not
//! persist bytes, enforce expiry, or resolve tag invalidation.
//!
//! # Design Philosophy
//!
//! Invalid keys fail loudly and immediately; storage errors fail quietly.
//! The only error a pool operation returns is [`PoolError::InvalidKey`],
//! raised before any backend call. Backend failures degrade to boolean
//! `false` results or miss-shaped items, with the underlying error kept
//! on a diagnostic side channel rather than discarded.
//!
//! # Example
//!
//! ```ignore
//! let mut pool = ItemPool::new(my_backend);
//!
//! let mut item = CacheItem::new("user.42", serde_json::json!({"name": "ada"}));
//! item.expires_after(Some(chrono::Duration::hours(1)));
//! item.add_tags(["user"]);
//! pool.save_deferred(item);
//!
//! // Deferred items flush on commit(), on has_item(), or when the pool
//! // is dropped.
//! assert!(pool.commit());
//!
//! let fetched = pool.get_item("user.42", false)?;
//! assert!(fetched.is_hit());
//! ```

pub mod backend;
pub mod error;
pub mod item;
pub mod key;
pub mod pool;
pub mod tags;

pub use backend::{CacheBackend, CacheRecord, CacheWrite};
pub use error::{BackendError, PoolError, PoolResult};
pub use item::{CacheItem, Expiration};
pub use key::validate_key;
pub use pool::ItemPool;
pub use tags::merge_tags;
