//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use userhub_core::config::MemoryCacheConfig;
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;

/// Cached value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Duration,
}

/// Expires every entry after its own TTL, restarting on overwrite.
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Ordinary entries live in a capacity-bounded cache. Pinned entries live
/// in a second cache with no size bound, so they leave only by TTL or
/// explicit delete.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, CacheEntry>,
    pinned: Cache<String, CacheEntry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        let pinned = Cache::builder().expire_after(PerEntryTtl).build();

        Self { cache, pinned }
    }
}

fn entry(value: &str, ttl: Duration) -> CacheEntry {
    CacheEntry {
        value: value.to_string(),
        ttl,
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(entry) = self.pinned.get(key).await {
            return Ok(Some(entry.value));
        }
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.pinned.invalidate(key).await;
        self.cache.insert(key.to_string(), entry(value, ttl)).await;
        Ok(())
    }

    async fn set_pinned(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache.invalidate(key).await;
        self.pinned.insert(key.to_string(), entry(value, ttl)).await;
        Ok(())
    }

    async fn set_pinned_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        if self.cache.contains_key(key) {
            return Ok(false);
        }
        let created = self
            .pinned
            .entry(key.to_string())
            .or_insert(entry(value, ttl))
            .await
            .is_fresh();
        Ok(created)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        self.pinned.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        if self.pinned.get(key).await.is_some() {
            return Ok(true);
        }
        Ok(self.cache.get(key).await.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
