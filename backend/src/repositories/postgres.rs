//! PostgreSQL-backed store

use super::Store;
use crate::db;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Store over a shared connection pool. Cloning is cheap.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }
}
