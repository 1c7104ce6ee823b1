//! Database layer for the Mar Quente Hub backend.
//!
//! Contains the entity models, the Postgres repositories, and the
//! [`store::DataStore`] trait with its two implementations
//! ([`store::PgStore`] and [`store::MemStore`]). The rest of the
//! workspace talks to persistence exclusively through `DataStore`, so
//! the backend can be swapped at startup without touching handlers.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod models;
pub mod repositories;
pub mod store;

/// Create a Postgres connection pool from a database URL.
///
/// Uses a modest pool size suited to a single-instance deployment;
/// acquire timeouts fail fast so a down database is visible at startup.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Run all embedded migrations from `crates/db/migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Verify database connectivity with a trivial query.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
