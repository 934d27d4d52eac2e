//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account.
///
/// Email and username are unique across all rows, soft-deleted ones
/// included; a deleted record never releases its identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Unique email address; also the token subject.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Access-control role.
    pub role: UserRole,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the record is live (not soft-deleted).
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub hashed_password: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Partial profile update. Only these four fields are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New given name.
    pub firstname: Option<String>,
    /// New family name.
    pub lastname: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New username.
    pub username: Option<String>,
}

impl UpdateUser {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.username.is_none()
    }

    /// Apply the set fields to a user in place.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(firstname) = &self.firstname {
            user.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            user.lastname = lastname.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
    }
}
