//! Error types for pool operations.

use thiserror::Error;

/// Errors reported by a [`CacheBackend`](crate::backend::CacheBackend).
///
/// The pool never propagates these to callers: storage-level failures
/// degrade to boolean `false` results or miss-shaped items. They are kept
/// around on the pool's diagnostic side channel so tests and operators can
/// still see what went wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Read failed for key {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("Delete failed: {reason}")]
    DeleteFailed { reason: String },
}

/// Master error type for pool operations.
///
/// `InvalidKey` is the only variant public pool operations surface; it is
/// raised before any backend call is made. `Backend` exists for the
/// diagnostic side channel and for backend implementors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("Key {key:?} contains characters outside A-Za-z0-9_.")]
    InvalidKey { key: String },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type alias for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
