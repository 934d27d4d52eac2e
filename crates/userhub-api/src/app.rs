//! Application builder: wires router, middleware and state into an Axum app.

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use userhub_cache::CacheManager;
use userhub_core::config::AppConfig;
use userhub_core::error::AppError;
use userhub_database::{PgUserRepository, UserStore};

use crate::error::ApiError;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    with_panic_guard(build_router(state))
        .layer(from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Turns a panicking handler into a 500 with the standard error body.
pub fn with_panic_guard(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    ApiError(AppError::internal(format!("Handler panicked: {detail}"))).into_response()
}

/// Runs the UserHub server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting UserHub server...");

    let pool = userhub_database::pool::open(&config.database).await?;

    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let users: Arc<dyn UserStore> = Arc::new(PgUserRepository::new(pool.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, users, cache)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("UserHub server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    pool.close().await;
    tracing::info!("UserHub server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
