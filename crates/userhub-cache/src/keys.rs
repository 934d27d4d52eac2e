//! Cache key builders for every UserHub cache entry.

/// Cache key marking a token id as revoked.
pub fn revoked_jti(jti: &str) -> String {
    format!("revoked:jti:{jti}")
}
