//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use userhub_core::types::PageRequest;
use userhub_entity::user::UpdateUser;
use userhub_service::NewUser;

/// Signup (and admin create) request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// First name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub firstname: String,
    /// Last name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    pub password: String,
}

impl From<SignupRequest> for NewUser {
    fn from(req: SignupRequest) -> Self {
        Self {
            firstname: req.firstname,
            lastname: req.lastname,
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}

/// Login request body. Length policy lives in the session service, which
/// reads it from `[auth]` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Partial profile update. Unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// First name.
    #[validate(length(min = 1))]
    pub firstname: Option<String>,
    /// Last name.
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Username.
    #[validate(length(min = 1))]
    pub username: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            firstname: req.firstname,
            lastname: req.lastname,
            email: req.email,
            username: req.username,
        }
    }
}

/// `GET /users/all` query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersQuery {
    /// Records to skip (default 0).
    pub skip: Option<u64>,
    /// Page size (default and max 100).
    pub limit: Option<u64>,
}

impl ListUsersQuery {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.skip.unwrap_or(defaults.offset()),
            self.limit.unwrap_or(defaults.limit()),
        )
    }
}
