//! JWT claims carried by access and refresh tokens.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use userhub_entity::user::UserRole;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new token pairs.
    Refresh,
}

impl TokenKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied claims, before the codec stamps `iat`, `exp` and `jti`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// Subject: the user's email.
    pub sub: String,
    /// The user's id.
    pub id: Uuid,
    /// Role, present on refresh tokens only.
    pub role: Option<UserRole>,
    /// Token kind.
    pub kind: TokenKind,
}

impl ClaimSet {
    /// Claims for an access token.
    pub fn access(email: impl Into<String>, id: Uuid) -> Self {
        Self {
            sub: email.into(),
            id,
            role: None,
            kind: TokenKind::Access,
        }
    }

    /// Claims for a refresh token.
    pub fn refresh(email: impl Into<String>, id: Uuid, role: UserRole) -> Self {
        Self {
            sub: email.into(),
            id,
            role: Some(role),
            kind: TokenKind::Refresh,
        }
    }
}

/// Full JWT payload as signed and parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// The user's id.
    pub id: Uuid,
    /// Role, present on refresh tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id, the revocation key.
    pub jti: Uuid,
    /// Token kind.
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    /// Strips the codec-stamped fields.
    pub fn claim_set(&self) -> ClaimSet {
        ClaimSet {
            sub: self.sub.clone(),
            id: self.id,
            role: self.role,
            kind: self.kind,
        }
    }

    /// Time left until expiry, zero once expired.
    pub fn remaining_ttl(&self) -> Duration {
        let remaining = self.exp - Utc::now().timestamp();
        Duration::from_secs(remaining.max(0) as u64)
    }
}
