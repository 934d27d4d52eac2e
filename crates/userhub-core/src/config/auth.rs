//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret shipped in the default configuration.
/// Refused when running in production.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token lifetimes, signing, and credential policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HMAC token signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Signing algorithm name (`HS256`, `HS384` or `HS512`).
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Minimum time a revoked jti stays on the blocklist, in seconds.
    #[serde(default = "default_revocation_ttl")]
    pub revocation_ttl_seconds: u64,
    /// Revoke the presented refresh token when it is exchanged for a new pair.
    #[serde(default)]
    pub rotate_refresh_tokens: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum accepted email length at login.
    #[serde(default = "default_login_email_max")]
    pub login_email_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_algorithm: default_jwt_algorithm(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            revocation_ttl_seconds: default_revocation_ttl(),
            rotate_refresh_tokens: false,
            password_min_length: default_password_min(),
            login_email_max_length: default_login_email_max(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 3600
}

fn default_revocation_ttl() -> u64 {
    3600
}

fn default_password_min() -> usize {
    6
}

fn default_login_email_max() -> usize {
    40
}
