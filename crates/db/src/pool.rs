//! Postgres connection pool.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Discrete connection settings, for deployments that do not hand out a URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub db_name: String,
    /// One of `disable`, `allow`, `prefer`, `require`, `verify-ca`, `verify-full`.
    pub ssl_mode: String,
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, DbError> {
        let ssl_mode: PgSslMode = self.ssl_mode.parse()?;
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.db_name)
            .ssl_mode(ssl_mode);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

/// Create a new connection pool from the given `database_url`.
///
/// `max_connections` controls the pool ceiling. One connection is opened
/// eagerly, so an unreachable server fails here rather than on first use.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", max_connections);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Same as [`create_pool`], from discrete settings.
pub async fn create_pool_with_config(
    config: &DbConfig,
    max_connections: u32,
) -> Result<DbPool, DbError> {
    info!(
        host = %config.host,
        port = config.port,
        db_name = %config.db_name,
        "Connecting to database (max_connections={})",
        max_connections
    );
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(config.connect_options()?)
        .await?;
    Ok(pool)
}
