//! Auth handlers: signup, login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use userhub_auth::session::ResolvedToken;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{MessageResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RefreshUser, ValidatedJson};
use crate::state::AppState;

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state.sessions.login(&req.email, &req.password).await?;
    Ok(Json(pair.into()))
}

/// POST /auth/refresh_token
///
/// The refresh guard has already resolved the token, so the pair is
/// reissued from that resolution.
pub async fn refresh_token(
    State(state): State<AppState>,
    caller: RefreshUser,
) -> Result<Json<TokenResponse>, ApiError> {
    let resolved = ResolvedToken {
        claims: caller.claims,
        user: caller.user,
    };
    let pair = state.sessions.reissue(&resolved).await?;
    Ok(Json(pair.into()))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.sessions.revoke_current(&auth.token).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
