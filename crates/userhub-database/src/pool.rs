//! PostgreSQL pool setup. Opening a pool also brings the schema up to date.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use userhub_core::config::DatabaseConfig;
use userhub_core::error::{AppError, ErrorKind};
use userhub_core::result::AppResult;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Connects to PostgreSQL and applies pending migrations from `migrations/`.
pub async fn open(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );

    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;

    info!("Database ready");
    Ok(pool)
}
