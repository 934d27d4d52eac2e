//! User directory handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use userhub_core::error::AppError;

use crate::dto::request::{ListUsersQuery, SignupRequest, UpdateUserRequest};
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::{AdminUser, AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /users/me
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(auth.user.into())
}

/// GET /users/all (admin)
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let page = query.into_page_request();

    let users = state.user_service.list_users(&page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state.user_service.get_user_by_id(id).await?;
    Ok(Json(user.into()))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state.user_service.update_user(id, req.into()).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn soft_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state.user_service.soft_delete(id).await?;
    tracing::info!(target_id = %id, actor_id = %auth.user.id, "User soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}/hard (admin)
pub async fn hard_delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state.user_service.hard_delete(id).await?;
    tracing::info!(target_id = %id, actor_id = %admin.user.id, "User permanently deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /users/{id}/restore (admin)
pub async fn restore(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_uuid(&id)?;
    let user = state.user_service.restore(id).await?;
    Ok(Json(user.into()))
}

/// POST /users (admin)
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
