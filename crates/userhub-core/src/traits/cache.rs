//! Cache provider trait for pluggable caching backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends (Redis or in-memory).
///
/// Values are plain strings. Every entry carries its own TTL and expires on
/// the backend's own clock; callers never poll for expiry.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL (`SET key value EX ttl`).
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value that must stay readable until `ttl` elapses. Unlike
    /// [`set`](Self::set), a pinned entry is never dropped to reclaim space.
    async fn set_pinned(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Pinned set that only writes when `key` is absent (`SET key value NX EX ttl`).
    /// Returns `true` when this call created the entry.
    async fn set_pinned_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists in the cache.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
