use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

/// Errors raised while setting up the connection pool
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the process-wide connection pool. Built once at startup and closed
/// on shutdown; never recreated in between.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Builds the pool without opening a connection. Connections are made on
    /// first use, so the server starts even while the database is down.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(url)?;

        info!(
            "Created database pool (max_connections={}, table={})",
            config.max_connections, config.table
        );
        Ok(pool)
    }

    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
