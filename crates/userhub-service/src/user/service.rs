//! User directory operations with username/email conflict checks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use userhub_auth::password::{PasswordHasher, PasswordValidator};
use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::types::PageRequest;
use userhub_database::UserStore;
use userhub_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Signup payload with the plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Username.
    pub username: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Handles user directory operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Fails if another record, deleted or not, owns `username` or `email`.
    ///
    /// The username conflict wins when both collide. This check is advisory;
    /// the store's unique index is the real guarantee.
    pub async fn check_uniqueness(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = self
            .users
            .find_conflicting(username, email, excluding)
            .await?;

        if let Some(username) = username {
            if existing.iter().any(|u| u.username == username) {
                return Err(AppError::username_conflict("Username already registered"));
            }
        }
        if let Some(email) = email {
            if existing.iter().any(|u| u.email == email) {
                return Err(AppError::email_conflict("Email already in use"));
            }
        }
        Ok(())
    }

    /// Registers a new account with the `user` role.
    pub async fn create_user(&self, data: NewUser) -> AppResult<User> {
        self.validator.validate(&data.password)?;
        self.check_uniqueness(Some(&data.username), Some(&data.email), None)
            .await?;

        let hashed_password = self.hasher.hash_password(&data.password)?;
        let user = self
            .users
            .create(&CreateUser {
                firstname: data.firstname,
                lastname: data.lastname,
                email: data.email,
                username: data.username,
                hashed_password,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Fetches a non-deleted user.
    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::user_not_found("User not found"))
    }

    /// Lists non-deleted users, newest first.
    pub async fn list_users(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        self.users.list_active(page).await
    }

    /// Applies a partial profile update to a non-deleted user.
    pub async fn update_user(&self, id: Uuid, data: UpdateUser) -> AppResult<User> {
        if data.is_empty() {
            return Err(AppError::validation("No update data provided"));
        }

        self.get_user_by_id(id).await?;
        self.check_uniqueness(data.username.as_deref(), data.email.as_deref(), Some(id))
            .await?;

        let user = self
            .users
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::user_not_found("User not found"))?;

        info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Marks a user deleted. Absent or already-deleted users are not found.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let active = self.users.find_by_id(id).await?.filter(User::is_active);
        if active.is_none() {
            return Err(AppError::user_not_found("User not found or already deleted"));
        }
        self.users.set_deleted(id, true).await?;

        info!(user_id = %id, "User soft-deleted");
        Ok(())
    }

    /// Clears the deleted flag.
    pub async fn restore(&self, id: Uuid) -> AppResult<User> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found("User not found"))?;
        if !user.is_deleted {
            return Err(AppError::validation("user not deleted"));
        }

        let user = self
            .users
            .set_deleted(id, false)
            .await?
            .ok_or_else(|| AppError::user_not_found("User not found"))?;

        info!(user_id = %id, "User restored");
        Ok(user)
    }

    /// Removes a user irrecoverably.
    pub async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::user_not_found("User not found"));
        }

        info!(user_id = %id, "User hard-deleted");
        Ok(())
    }
}
