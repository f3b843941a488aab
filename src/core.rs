//! Core MothHaus functionality
//!
//! This module contains the main MothHaus struct, which owns the database
//! pool and hands out stores bound to it.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use store_object::generic_store::{GenericStore, PgExecutor};
use store_object::schema::Schema;

use crate::errors::MothHausError;
use config::DatabaseConfig;

/// Main MothHaus coordinator that manages the database connection
#[derive(Debug, Clone)]
pub struct MothHaus {
    pool: PgPool,
}

impl MothHaus {
    /// Create new MothHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, MothHausError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "database pool ready"
        );

        Ok(Self { pool })
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Executor sharing this pool
    pub fn executor(&self) -> PgExecutor {
        PgExecutor::new(self.pool.clone())
    }

    /// Store for `schema` backed by this pool
    pub fn store(&self, schema: Schema) -> GenericStore {
        GenericStore::new(Arc::new(self.executor()), schema)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), MothHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
