//! Unified application error types for UserHub.
//!
//! Every failure in the auth and user-directory paths is raised as an
//! [`AppError`] carrying an [`ErrorKind`]. The HTTP layer translates the kind
//! into a status code and a structured JSON body; nothing below that layer
//! knows about HTTP.

use std::fmt;
use thiserror::Error;

/// Error taxonomy shared by every crate in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Bad email/password at login.
    CredentialsInvalid,
    /// The token's embedded expiry has passed.
    TokenExpired,
    /// The token signature or structure is invalid.
    MalformedToken,
    /// The token's jti is on the revocation blocklist.
    TokenRevoked,
    /// An access token was presented where a refresh token was expected, or vice versa.
    WrongTokenType,
    /// The user does not exist or is soft-deleted.
    UserNotFound,
    /// Another record already owns the username.
    UsernameConflict,
    /// Another record already owns the email.
    EmailConflict,
    /// Authenticated, but the role is not allowed.
    PermissionDenied,
    /// Input validation failed.
    Validation,
    /// No route matches the request path.
    RouteNotFound,
    /// The path exists but not for this method.
    MethodNotAllowed,
    /// Catch-all for unexpected failures.
    Internal,
    /// A database error occurred.
    Database,
    /// A cache error occurred.
    Cache,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Returns true for kinds that must be reported to clients as a generic internal error.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Database | Self::Cache | Self::Configuration | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialsInvalid => write!(f, "CREDENTIALS_INVALID"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::WrongTokenType => write!(f, "WRONG_TOKEN_TYPE"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::UsernameConflict => write!(f, "USERNAME_CONFLICT"),
            Self::EmailConflict => write!(f, "EMAIL_CONFLICT"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::RouteNotFound => write!(f, "ROUTE_NOT_FOUND"),
            Self::MethodNotAllowed => write!(f, "METHOD_NOT_ALLOWED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout UserHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a credentials-invalid error.
    pub fn credentials_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialsInvalid, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create a token-revoked error.
    pub fn token_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRevoked, message)
    }

    /// Create a wrong-token-type error.
    pub fn wrong_token_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongTokenType, message)
    }

    /// Create a user-not-found error.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserNotFound, message)
    }

    /// Create a username-conflict error.
    pub fn username_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UsernameConflict, message)
    }

    /// Create an email-conflict error.
    pub fn email_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmailConflict, message)
    }

    /// Create a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a route-not-found error.
    pub fn route_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RouteNotFound, message)
    }

    /// Create a method-not-allowed error.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotAllowed, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
