//! Database connection pool and the query seam used by handlers.
//!
//! Handlers never touch the pool directly. They go through the [`Database`]
//! trait, which [`PgDatabase`] implements on top of the shared pool and tests
//! implement with canned results.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::config::Config;

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create the process-wide PostgreSQL connection pool.
///
/// The pool connects lazily: no connection is opened until the first query,
/// so the service starts (and reports itself unhealthy) while the database is
/// still unreachable.
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed.
pub fn create_pool(config: &Config) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect_lazy(&config.database_url)
}

/// The queries this service issues.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run the liveness query and return its sentinel value (`1` when healthy).
    async fn health_check(&self) -> Result<i32, sqlx::Error>;

    /// Current time according to the database server.
    async fn server_time(&self) -> Result<DateTime<Utc>, sqlx::Error>;
}

/// [`Database`] backed by the shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: DbPool,
}

impl PgDatabase {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn health_check(&self) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT 1 AS health_check")
            .fetch_one(&self.pool)
            .await
    }

    async fn server_time(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW() AS server_time")
            .fetch_one(&self.pool)
            .await
    }
}

/// Whether a database error means the server could not be reached.
///
/// Transport-level errors are connectivity failures by type. Anything else
/// counts as one when its message mentions "connect".
pub fn is_connectivity_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => true,
        other => other.to_string().contains("connect"),
    }
}
