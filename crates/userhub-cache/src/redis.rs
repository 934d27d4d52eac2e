//! Redis cache provider.
//!
//! Every key is namespaced with the configured prefix. Redis has a single
//! keyspace, so pinned and ordinary writes are the same `SET EX`; keeping
//! pinned keys resident relies on the server running a `noeviction` or
//! `volatile-*` policy that never drops keys carrying a TTL early.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use userhub_core::config::RedisCacheConfig;
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;

/// Redis-backed cache provider over a reconnecting connection manager.
#[derive(Clone)]
pub struct RedisCacheProvider {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

impl RedisCacheProvider {
    /// Connect using the given configuration.
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        info!(url = %config.redacted_url(), "Connecting to Redis");

        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Invalid Redis URL", e))?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!("Successfully connected to Redis");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

/// `SET EX` rejects zero, so sub-second TTLs round up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.key(key)).await.map_err(Self::map_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(self.key(key), value, ttl_seconds(ttl))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn set_pinned(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.set(key, value, ttl).await
    }

    async fn set_pinned_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        // Replies OK when the key was written, nil when it already existed.
        let reply: Option<String> = redis::cmd("SET")
            .arg(self.key(key))
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds(ttl))
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.key(key)).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(self.key(key)).await.map_err(Self::map_err)?;
        Ok(found)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
