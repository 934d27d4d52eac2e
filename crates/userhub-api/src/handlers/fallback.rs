//! Structured JSON replies for requests no route accepts.

use axum::http::{Method, Uri};

use userhub_core::error::AppError;

use crate::error::ApiError;

/// Any path without a route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::route_not_found(format!(
        "No route for {}",
        uri.path()
    )))
}

/// A known path hit with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError(AppError::method_not_allowed(format!(
        "Method {method} is not allowed on {}",
        uri.path()
    )))
}
