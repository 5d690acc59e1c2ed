//! Database plumbing shared by the repositories.
//!
//! # Tables
//!
//! - `customers` - customer scalars plus the flattened address columns
//! - `products` - product catalogue
//! - `orders` - order header with the denormalized total
//! - `order_items` - lines of an order, keyed by their own id
//!
//! Migrations live in `migrations/` and are embedded at compile time.

pub mod customer;
pub mod order;
pub mod product;

use std::future::Future;
use std::str::FromStr;
use std::time::Instant;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;
use crate::metrics::Metrics;

pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Database error from sqlx, passed through untouched.
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row does not satisfy the entity's invariants.
    #[error("invalid {entity} record {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// The write would steal a row that belongs to another aggregate.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { entity, id: id.into() }
    }

    pub(crate) fn invalid_record(
        entity: &'static str,
        id: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidRecord {
            entity,
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Create a SQLite connection pool from configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_in_memory() {
        // the database disappears with its only connection, so keep it forever
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    tracing::info!(
        url = %config.url,
        in_memory = config.is_in_memory(),
        "Opening database pool"
    );

    pool_options
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Open a pool and bring the schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Time a repository call and record its outcome when metrics are enabled
pub(crate) async fn instrumented<T, F>(
    metrics: Option<&Metrics>,
    repository: &str,
    operation: &str,
    call: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    let started = Instant::now();
    let result = call.await;

    if let Some(metrics) = metrics {
        metrics.record_repository_operation(
            repository,
            operation,
            started.elapsed().as_secs_f64(),
            result.is_ok(),
        );
    }

    if let Err(e) = &result {
        tracing::debug!(repository, operation, error = %e, "Repository operation failed");
    }

    result
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open")
}
