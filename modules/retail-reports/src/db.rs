use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Initialize the process-wide connection pool from configuration
///
/// The pool is created once at startup and closed after the server shuts down.
pub async fn init_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    connect(
        &config.database_url,
        config.db_max_connections,
        config.db_min_connections,
        config.db_acquire_timeout_secs,
    )
    .await
}

/// Initialize a pool directly from a database URL
///
/// Connection limits fall back to `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS`
/// and `DB_ACQUIRE_TIMEOUT_SECS` so test binaries can cap them.
pub async fn init_pool_from_url(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10);

    let min_connections = std::env::var("DB_MIN_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);

    let acquire_timeout_secs = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(3);

    connect(database_url, max_connections, min_connections, acquire_timeout_secs).await
}

async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
    acquire_timeout_secs: u64,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Apply the reference schema under `db/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./db/migrations").run(pool).await
}
