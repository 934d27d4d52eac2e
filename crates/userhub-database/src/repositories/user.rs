//! User store trait and its PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;
use userhub_core::types::PageRequest;
use userhub_entity::user::{CreateUser, UpdateUser, User};

/// Unique constraint guarding `users.username`.
const USERNAME_CONSTRAINT: &str = "users_username_key";
/// Unique constraint guarding `users.email`.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Relational store for user records.
///
/// Lookups by id and email return soft-deleted rows too; callers decide
/// whether a deleted record counts as absent. Implementations must enforce
/// username/email uniqueness on write, since the service-level check is
/// only advisory under concurrency.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find every record (deleted or not) that owns the given username or
    /// email, skipping `excluding`.
    async fn find_conflicting(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<Uuid>,
    ) -> AppResult<Vec<User>>;

    /// List non-deleted users, newest first.
    async fn list_active(&self, page: &PageRequest) -> AppResult<Vec<User>>;

    /// Insert a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update to a non-deleted user. `None` if no such user.
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>>;

    /// Set the soft-delete flag. `None` if no such user.
    async fn set_deleted(&self, id: Uuid, deleted: bool) -> AppResult<Option<User>>;

    /// Physically remove a user. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Translate unique-index violations into the matching conflict kind.
    fn map_write_err(e: sqlx::Error, context: &'static str) -> AppError {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(USERNAME_CONSTRAINT) => {
                AppError::username_conflict("Username already registered")
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(EMAIL_CONSTRAINT) => {
                AppError::email_conflict("Email already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, context, e),
        }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_conflicting(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<Uuid>,
    ) -> AppResult<Vec<User>> {
        if username.is_none() && email.is_none() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE (username = $1 OR email = $2) \
               AND ($3::uuid IS NULL OR id <> $3)",
        )
        .bind(username)
        .bind(email)
        .bind(excluding)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check user uniqueness", e)
        })
    }

    async fn list_active(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE is_deleted = FALSE \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (firstname, lastname, email, username, hashed_password, role) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.hashed_password)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to create user"))
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET firstname = COALESCE($2, firstname), \
                              lastname = COALESCE($3, lastname), \
                              email = COALESCE($4, email), \
                              username = COALESCE($5, username) \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(&data.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_err(e, "Failed to update user"))
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("UPDATE users SET is_deleted = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(deleted)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update delete flag", e)
            })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
