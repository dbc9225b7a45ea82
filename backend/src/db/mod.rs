//! Store selection and PostgreSQL pool management
//!
//! `connect_store` turns `database.url` into the store handle every
//! component shares: `memory:` selects the in-process store, anything else
//! is a PostgreSQL URL.

use crate::config::{AppConfig, DatabaseConfig};
use crate::repositories::{DynStore, MemoryStore, PgStore};
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning beyond what the config file exposes
pub struct PoolSettings {
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Build the configured store. Migrations run outside production.
pub async fn connect_store(config: &DatabaseConfig) -> Result<DynStore> {
    if config.is_memory() {
        warn!("Using the in-process store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::new()));
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.url, config.max_connections, &PoolSettings::default())
        .await
        .context("Failed to connect to database")?;

    if !AppConfig::is_production() {
        run_migrations(&pool).await?;
    }

    Ok(Arc::new(PgStore::new(pool)))
}

/// Create a PostgreSQL connection pool
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    settings: &PoolSettings,
) -> Result<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(database_url)?.application_name("resume-manager");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        "Database pool created: max={}, min={}",
        max_connections, settings.min_connections
    );

    Ok(pool)
}

/// Apply the SQL migrations under `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
