//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use userhub_api::{AppState, build_app};
use userhub_auth::jwt::{ClaimSet, TokenCodec};
use userhub_auth::password::PasswordHasher;
use userhub_cache::CacheManager;
use userhub_core::config::AppConfig;
use userhub_database::{MemoryUserRepository, UserStore};
use userhub_entity::user::{CreateUser, User, UserRole};

/// Password used for every seeded account.
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing user store for direct inspection
    pub users: MemoryUserRepository,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default settings.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a new test application with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let users = MemoryUserRepository::new();
        let store: Arc<dyn UserStore> = Arc::new(users.clone());
        let cache = Arc::new(CacheManager::in_memory());

        let state =
            AppState::new(config.clone(), store, cache).expect("Failed to build app state");

        Self {
            router: build_app(state),
            users,
            config,
        }
    }

    /// Insert a user directly into the store, bypassing the HTTP surface.
    pub async fn seed_user(&self, username: &str, role: UserRole) -> User {
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        self.users
            .create(&CreateUser {
                firstname: "Test".to_string(),
                lastname: "User".to_string(),
                email: email_for(username),
                username: username.to_string(),
                hashed_password: hash,
                role,
            })
            .await
            .expect("Failed to seed user")
    }

    /// Login and return the full token-pair body.
    pub async fn login(&self, username: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "email": email_for(username),
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the access token.
    pub async fn access_token(&self, username: &str) -> String {
        token_field(&self.login(username).await, "access_token")
    }

    /// Mint an access token for `user` that expired one second ago.
    pub fn expired_access_token(&self, user: &User) -> String {
        let codec = TokenCodec::new(&self.config.auth).expect("Failed to build codec");
        codec
            .issue(
                &ClaimSet::access(user.email.clone(), user.id),
                chrono::Duration::seconds(-1),
            )
            .expect("Failed to issue token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error.code` field of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

/// Configuration with a fixed secret and default lifetimes.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// Deterministic email for a seeded username.
pub fn email_for(username: &str) -> String {
    format!("{username}@test.com")
}

/// Extract a string field from a token-pair body.
pub fn token_field(body: &Value, field: &str) -> String {
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("No {field} in body: {body:?}"))
        .to_string()
}

/// Parse the `id` field of a user body.
pub fn user_id(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("No id in user body")
}
