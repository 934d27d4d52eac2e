//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use userhub_core::error::{AppError, ErrorKind};

/// Message sent to clients in place of any internal error detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error payload: `{"error": {"type", "code", "message"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// The error detail.
    pub error: ApiErrorBody,
}

/// Inner error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper for [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::CredentialsInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::MalformedToken
        | ErrorKind::WrongTokenType => StatusCode::UNAUTHORIZED,
        ErrorKind::TokenRevoked | ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorKind::UserNotFound | ErrorKind::RouteNotFound => StatusCode::NOT_FOUND,
        ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorKind::UsernameConflict | ErrorKind::EmailConflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `(type, code)` pair for an error kind.
pub fn classify(kind: ErrorKind) -> (&'static str, &'static str) {
    match kind {
        ErrorKind::CredentialsInvalid => ("authentication_error", "invalid_credentials"),
        ErrorKind::TokenExpired => ("authentication_error", "token_expired"),
        ErrorKind::MalformedToken => ("authentication_error", "invalid_token"),
        ErrorKind::TokenRevoked => ("authentication_error", "token_revoked"),
        ErrorKind::WrongTokenType => ("authentication_error", "wrong_token_type"),
        ErrorKind::UserNotFound => ("invalid_request_error", "resource_not_found"),
        ErrorKind::UsernameConflict => ("invalid_request_error", "username_taken"),
        ErrorKind::EmailConflict => ("invalid_request_error", "email_in_use"),
        ErrorKind::PermissionDenied => ("permission_error", "insufficient_permissions"),
        ErrorKind::Validation => ("invalid_request_error", "validation_error"),
        ErrorKind::RouteNotFound => ("invalid_request_error", "route_not_found"),
        ErrorKind::MethodNotAllowed => ("invalid_request_error", "method_not_allowed"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Configuration
        | ErrorKind::Serialization => ("api_error", "internal_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);
        let (kind, code) = classify(err.kind);

        let message = if err.kind.is_internal() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Internal server error");
            INTERNAL_MESSAGE.to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                kind: kind.to_string(),
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
