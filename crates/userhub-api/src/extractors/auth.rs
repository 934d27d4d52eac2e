//! Bearer-token extractors: each runs the access gate with a fixed guard.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use userhub_auth::gate::GuardSpec;
use userhub_auth::jwt::Claims;
use userhub_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Compile-time choice of guard for an extractor.
pub trait GuardKind: Send + Sync + 'static {
    /// The guard applied to the request.
    const SPEC: GuardSpec;
}

/// Any valid access token.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard;

/// Any valid refresh token.
#[derive(Debug, Clone, Copy)]
pub struct RefreshGuard;

/// A valid access token held by an admin.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

impl GuardKind for AccessGuard {
    const SPEC: GuardSpec = GuardSpec::ACCESS;
}

impl GuardKind for RefreshGuard {
    const SPEC: GuardSpec = GuardSpec::REFRESH;
}

impl GuardKind for AdminGuard {
    const SPEC: GuardSpec = GuardSpec::ADMIN;
}

/// The authorized caller, available in handlers.
#[derive(Debug, Clone)]
pub struct Guarded<G> {
    /// The authenticated user.
    pub user: User,
    /// Claims of the presented token.
    pub claims: Claims,
    /// The raw bearer token.
    pub token: String,
    _guard: PhantomData<fn() -> G>,
}

/// Caller with a valid access token.
pub type AuthUser = Guarded<AccessGuard>;
/// Caller with a valid refresh token.
pub type RefreshUser = Guarded<RefreshGuard>;
/// Admin caller with a valid access token.
pub type AdminUser = Guarded<AdminGuard>;

impl<G> std::ops::Deref for Guarded<G> {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl<G: GuardKind> FromRequestParts<AppState> for Guarded<G> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let authorized = state.gate.authorize(header, &G::SPEC).await?;

        Ok(Self {
            user: authorized.user,
            claims: authorized.claims,
            token: authorized.token,
            _guard: PhantomData,
        })
    }
}
