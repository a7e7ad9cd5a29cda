use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::core::config::DatabaseConfig;

/// Build the shared Postgres pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        "Database pool ready (max_connections={}, min_connections={})",
        config.max_connections,
        config.min_connections
    );

    Ok(pool)
}

/// Apply the schema in `./migrations` (foreign keys are RESTRICT on delete/update)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
