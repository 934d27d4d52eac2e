//! jti blocklist on top of the shared cache.
//!
//! An entry's presence means the token is rejected regardless of its own
//! expiry. Entries are written pinned, so they expire on the cache's clock
//! and are never evicted to make room for other keys.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use userhub_cache::CacheManager;
use userhub_cache::keys;
use userhub_core::result::AppResult;
use userhub_core::traits::cache::CacheProvider;

/// Sentinel value stored under a revoked jti.
const REVOKED: &str = "revoked";

/// Revocation store keyed by token id.
#[derive(Debug, Clone)]
pub struct RevocationStore {
    cache: Arc<CacheManager>,
    default_ttl: Duration,
}

impl RevocationStore {
    /// Creates a store whose default window is `default_ttl`.
    pub fn new(cache: Arc<CacheManager>, default_ttl: Duration) -> Self {
        Self { cache, default_ttl }
    }

    /// Blocks `jti` for `ttl`. Idempotent; re-revoking restarts the window.
    pub async fn revoke(&self, jti: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .set_pinned(&keys::revoked_jti(jti), REVOKED, ttl)
            .await?;
        debug!(jti, ttl_secs = ttl.as_secs(), "Token id revoked");
        Ok(())
    }

    /// Revokes `jti` only if it is not already revoked.
    ///
    /// Returns `true` for exactly one caller per jti, so a token can be
    /// spent once even under concurrent use.
    pub async fn claim(&self, jti: &str, ttl: Duration) -> AppResult<bool> {
        let claimed = self
            .cache
            .set_pinned_nx(&keys::revoked_jti(jti), REVOKED, ttl)
            .await?;
        debug!(jti, claimed, "Token id claim");
        Ok(claimed)
    }

    /// Blocks `jti` for the default window.
    pub async fn revoke_default(&self, jti: &str) -> AppResult<()> {
        self.revoke(jti, self.default_ttl).await
    }

    /// Whether `jti` is currently blocked. Cache failures propagate.
    pub async fn is_revoked(&self, jti: &str) -> AppResult<bool> {
        self.cache.exists(&keys::revoked_jti(jti)).await
    }

    /// Default revocation window.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
