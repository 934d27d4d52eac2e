//! Session lifecycle: login, refresh, logout, and token resolution.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use userhub_core::config::AuthConfig;
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_database::UserStore;
use userhub_entity::user::User;

use crate::jwt::{ClaimSet, Claims, TokenCodec, TokenKind};
use crate::password::{PasswordHasher, PasswordValidator};
use crate::revocation::RevocationStore;

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

/// A token that passed every check, with the user it belongs to.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    /// Decoded claims.
    pub claims: Claims,
    /// The live user named by the claims.
    pub user: User,
}

/// Issues, resolves and revokes tokens. One instance per process.
#[derive(Clone)]
pub struct SessionService {
    codec: Arc<TokenCodec>,
    revocations: Arc<RevocationStore>,
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    password_policy: PasswordValidator,
    login_email_max_length: usize,
    revocation_ttl: Duration,
    rotate_refresh_tokens: bool,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("codec", &self.codec)
            .field("revocation_ttl", &self.revocation_ttl)
            .field("rotate_refresh_tokens", &self.rotate_refresh_tokens)
            .finish()
    }
}

impl SessionService {
    /// Creates a session service.
    pub fn new(
        codec: Arc<TokenCodec>,
        revocations: Arc<RevocationStore>,
        users: Arc<dyn UserStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            codec,
            revocations,
            users,
            hasher: PasswordHasher::new(),
            password_policy: PasswordValidator::new(config),
            login_email_max_length: config.login_email_max_length,
            revocation_ttl: Duration::from_secs(config.revocation_ttl_seconds),
            rotate_refresh_tokens: config.rotate_refresh_tokens,
        }
    }

    /// The codec this service signs with.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Checks an email/password pair. Deleted users cannot log in.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::credentials_invalid("Incorrect email or password"))?;

        if !self.hasher.verify_password(password, &user.hashed_password)? {
            return Err(AppError::credentials_invalid("Incorrect email or password"));
        }

        Ok(user)
    }

    /// Authenticates and mints a fresh token pair.
    ///
    /// Inputs outside the configured length bounds are rejected as
    /// validation errors before any lookup.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        if email.chars().count() > self.login_email_max_length {
            return Err(AppError::validation(format!(
                "Email must be at most {} characters long",
                self.login_email_max_length
            )));
        }
        self.password_policy.validate(password)?;

        let user = match self.authenticate(email, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!(email, kind = %e.kind, "Login rejected");
                return Err(e);
            }
        };

        let pair = self.issue_pair(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Mints an access token `{sub, id}` and a refresh token `{sub, id, role}`.
    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        let access_token = self.codec.issue(
            &ClaimSet::access(&user.email, user.id),
            self.codec.access_ttl(),
        )?;
        let refresh_token = self.codec.issue(
            &ClaimSet::refresh(&user.email, user.id, user.role),
            self.codec.refresh_ttl(),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Runs parse, revocation, kind and user checks in that order.
    pub async fn resolve_token(&self, token: &str, expected: TokenKind) -> AppResult<ResolvedToken> {
        let claims = self.codec.parse(token)?;

        if self.revocations.is_revoked(&claims.jti.to_string()).await? {
            return Err(AppError::token_revoked("Token has been revoked"));
        }

        if claims.kind != expected {
            return Err(AppError::wrong_token_type(format!(
                "Invalid token type: expected {expected} token"
            )));
        }

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::user_not_found("User not found"))?;

        Ok(ResolvedToken { claims, user })
    }

    /// Resolves a token to its user.
    pub async fn resolve(&self, token: &str, expected: TokenKind) -> AppResult<User> {
        self.resolve_token(token, expected).await.map(|r| r.user)
    }

    /// Revokes the jti of an access token.
    ///
    /// The entry lives for the token's remaining lifetime or the configured
    /// revocation window, whichever is longer.
    pub async fn revoke_current(&self, token: &str) -> AppResult<()> {
        let claims = self.codec.parse(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AppError::wrong_token_type(
                "Invalid token type: expected access token",
            ));
        }

        self.revoke_claims(&claims).await?;
        info!(user_id = %claims.id, "User logged out");
        Ok(())
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// With rotation enabled the presented refresh token is revoked first.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let resolved = self.resolve_token(refresh_token, TokenKind::Refresh).await?;
        self.reissue(&resolved).await
    }

    /// Issues a new pair for an already-resolved refresh token, applying the
    /// rotation policy first.
    pub async fn reissue(&self, resolved: &ResolvedToken) -> AppResult<TokenPair> {
        if resolved.claims.kind != TokenKind::Refresh {
            return Err(AppError::wrong_token_type(
                "Invalid token type: expected refresh token",
            ));
        }
        if self.rotate_refresh_tokens {
            let ttl = resolved.claims.remaining_ttl().max(self.revocation_ttl);
            let jti = resolved.claims.jti.to_string();
            if !self.revocations.claim(&jti, ttl).await? {
                return Err(AppError::token_revoked("Token has been revoked"));
            }
            debug!(user_id = %resolved.user.id, jti = %resolved.claims.jti, "Refresh token rotated");
        }
        self.issue_pair(&resolved.user)
    }

    async fn revoke_claims(&self, claims: &Claims) -> AppResult<()> {
        let ttl = claims.remaining_ttl().max(self.revocation_ttl);
        self.revocations.revoke(&claims.jti.to_string(), ttl).await
    }
}
