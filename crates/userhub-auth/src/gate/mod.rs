//! Per-request access control.
//!
//! A request moves through `Parse -> RevocationCheck -> KindCheck ->
//! UserLookup -> RoleCheck` and is authorized only if every stage passes.
//! The first failing stage rejects it with that stage's error kind.

use std::sync::Arc;

use tracing::debug;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_entity::user::{User, UserRole};

use crate::jwt::{Claims, TokenKind};
use crate::session::SessionService;

/// Guard configuration for one protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSpec {
    /// Token kind the operation accepts.
    pub kind: TokenKind,
    /// Roles allowed through; `None` admits any authenticated user.
    pub roles: Option<&'static [UserRole]>,
}

impl GuardSpec {
    /// Any user holding a valid access token.
    pub const ACCESS: Self = Self::new(TokenKind::Access);
    /// Any user holding a valid refresh token.
    pub const REFRESH: Self = Self::new(TokenKind::Refresh);
    /// Admins holding a valid access token.
    pub const ADMIN: Self = Self::new(TokenKind::Access).with_roles(&[UserRole::Admin]);

    /// Guard for `kind` with no role restriction.
    pub const fn new(kind: TokenKind) -> Self {
        Self { kind, roles: None }
    }

    /// Restricts the guard to `roles`.
    pub const fn with_roles(self, roles: &'static [UserRole]) -> Self {
        Self {
            kind: self.kind,
            roles: Some(roles),
        }
    }
}

/// Stage at which a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    /// Header extraction, signature, or expiry.
    Parse,
    /// jti found on the blocklist.
    RevocationCheck,
    /// Token kind mismatch.
    KindCheck,
    /// Named user absent or deleted.
    UserLookup,
    /// Role not in the allowed set.
    RoleCheck,
    /// Infrastructure failure during any stage.
    Internal,
}

impl GateStage {
    /// Stage that produces errors of `kind`.
    pub fn of(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::MalformedToken | ErrorKind::TokenExpired => Self::Parse,
            ErrorKind::TokenRevoked => Self::RevocationCheck,
            ErrorKind::WrongTokenType => Self::KindCheck,
            ErrorKind::UserNotFound => Self::UserLookup,
            ErrorKind::PermissionDenied => Self::RoleCheck,
            _ => Self::Internal,
        }
    }
}

/// A request that passed its guard.
#[derive(Debug, Clone)]
pub struct Authorized {
    /// The authenticated user.
    pub user: User,
    /// Claims of the presented token.
    pub claims: Claims,
    /// The raw bearer token.
    pub token: String,
}

/// Access control gate shared by every protected route.
#[derive(Debug, Clone)]
pub struct AccessGate {
    sessions: Arc<SessionService>,
}

impl AccessGate {
    /// Creates a gate over the process-wide session service.
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }

    /// Pulls the token out of an `Authorization: Bearer <token>` header.
    pub fn extract_bearer(header: Option<&str>) -> AppResult<&str> {
        let header =
            header.ok_or_else(|| AppError::malformed_token("Missing authorization header"))?;

        let (scheme, token) = header
            .split_once(' ')
            .ok_or_else(|| AppError::malformed_token("Invalid authorization header format"))?;
        let token = token.trim();

        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AppError::malformed_token(
                "Invalid authorization header format",
            ));
        }
        Ok(token)
    }

    /// Resolves an access token to its user.
    pub async fn authenticate_request(&self, bearer_token: &str) -> AppResult<User> {
        self.sessions.resolve(bearer_token, TokenKind::Access).await
    }

    /// Fails with `PermissionDenied` unless the user's role is in `allowed`.
    pub fn require_role(user: &User, allowed: &[UserRole]) -> AppResult<()> {
        if allowed.contains(&user.role) {
            Ok(())
        } else {
            Err(AppError::permission_denied(
                "Not enough permissions to access this resource",
            ))
        }
    }

    /// Runs the full guard for one request.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        spec: &GuardSpec,
    ) -> AppResult<Authorized> {
        let outcome = self.run(authorization, spec).await;
        if let Err(e) = &outcome {
            debug!(stage = ?GateStage::of(e.kind), kind = %e.kind, "Request rejected by access gate");
        }
        outcome
    }

    async fn run(&self, authorization: Option<&str>, spec: &GuardSpec) -> AppResult<Authorized> {
        let token = Self::extract_bearer(authorization)?;
        let resolved = self.sessions.resolve_token(token, spec.kind).await?;

        if let Some(roles) = spec.roles {
            Self::require_role(&resolved.user, roles)?;
        }

        Ok(Authorized {
            user: resolved.user,
            claims: resolved.claims,
            token: token.to_string(),
        })
    }
}
