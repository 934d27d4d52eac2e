//! Route definitions for the UserHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Static `/users/*` segments are matched before
//! `/users/{id}`. Unknown paths and unsupported methods answer with the
//! same JSON error body as handler failures.

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes())
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed)
        .with_state(state)
}

/// Signup, login, refresh, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh_token", post(handlers::auth::refresh_token))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// User directory
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::create_user))
        .route("/users/", post(handlers::user::create_user))
        .route("/users/me", get(handlers::user::me))
        .route("/users/all", get(handlers::user::list_users))
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .patch(handlers::user::update_user)
                .delete(handlers::user::soft_delete),
        )
        .route("/users/{id}/hard", delete(handlers::user::hard_delete))
        .route("/users/{id}/restore", patch(handlers::user::restore))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
