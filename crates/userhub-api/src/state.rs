//! Application state shared across all handlers and extractors.

use std::sync::Arc;
use std::time::Duration;

use userhub_auth::gate::AccessGate;
use userhub_auth::jwt::TokenCodec;
use userhub_auth::password::{PasswordHasher, PasswordValidator};
use userhub_auth::revocation::RevocationStore;
use userhub_auth::session::SessionService;
use userhub_cache::CacheManager;
use userhub_core::config::AppConfig;
use userhub_core::result::AppResult;
use userhub_database::UserStore;
use userhub_service::UserService;

/// Application state passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// User store
    pub users: Arc<dyn UserStore>,
    /// Session lifecycle service
    pub sessions: Arc<SessionService>,
    /// Access control gate
    pub gate: Arc<AccessGate>,
    /// User directory service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires the auth and directory services over the given collaborators.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        cache: Arc<CacheManager>,
    ) -> AppResult<Self> {
        let codec = Arc::new(TokenCodec::new(&config.auth)?);
        let revocations = Arc::new(RevocationStore::new(
            Arc::clone(&cache),
            Duration::from_secs(config.auth.revocation_ttl_seconds),
        ));
        let sessions = Arc::new(SessionService::new(
            codec,
            revocations,
            Arc::clone(&users),
            &config.auth,
        ));
        let gate = Arc::new(AccessGate::new(Arc::clone(&sessions)));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
        ));

        Ok(Self {
            config: Arc::new(config),
            cache,
            users,
            sessions,
            gate,
            user_service,
        })
    }
}
