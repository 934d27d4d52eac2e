//! In-memory user repository using a Tokio lock for single-node use and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use userhub_core::error::AppError;
use userhub_core::result::AppResult;
use userhub_core::types::PageRequest;
use userhub_entity::user::{CreateUser, UpdateUser, User};

use super::user::UserStore;

/// In-memory user store.
///
/// Enforces the same global username/email uniqueness a unique index would,
/// under a single write lock, so concurrent signups cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, deleted ones included.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the repository holds no records.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

/// Index-style uniqueness check over every stored record.
fn ensure_unique(
    users: &HashMap<Uuid, User>,
    username: Option<&str>,
    email: Option<&str>,
    excluding: Option<Uuid>,
) -> AppResult<()> {
    let others = || users.values().filter(|u| Some(u.id) != excluding);

    if let Some(username) = username {
        if others().any(|u| u.username == username) {
            return Err(AppError::username_conflict("Username already registered"));
        }
    }
    if let Some(email) = email {
        if others().any(|u| u.email == email) {
            return Err(AppError::email_conflict("Email already in use"));
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_conflicting(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        excluding: Option<Uuid>,
    ) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| Some(u.id) != excluding)
            .filter(|u| {
                username.is_some_and(|name| u.username == name)
                    || email.is_some_and(|mail| u.email == mail)
            })
            .cloned()
            .collect())
    }

    async fn list_active(&self, page: &PageRequest) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut active: Vec<User> = users.values().filter(|u| !u.is_deleted).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(active
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        ensure_unique(&users, Some(&data.username), Some(&data.email), None)?;

        let user = User {
            id: Uuid::new_v4(),
            firstname: data.firstname.clone(),
            lastname: data.lastname.clone(),
            email: data.email.clone(),
            username: data.username.clone(),
            role: data.role,
            hashed_password: data.hashed_password.clone(),
            is_deleted: false,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        ensure_unique(
            &users,
            data.username.as_deref(),
            data.email.as_deref(),
            Some(id),
        )?;

        match users.get_mut(&id) {
            Some(user) if !user.is_deleted => {
                data.apply_to(user);
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_deleted(&self, id: Uuid, deleted: bool) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.is_deleted = deleted;
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
