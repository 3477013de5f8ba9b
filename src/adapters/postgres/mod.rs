//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPricingCatalog` - Read-only catalog queries
//! - `PostgresBookingRepository` - Bookings with conditional status updates
//! - `PostgresInquiryRepository` - Surgery inquiries
//!
//! `connect` builds the pool from `DatabaseConfig` and applies the embedded
//! migrations when enabled.

mod booking_repository;
mod catalog;
mod inquiry_repository;

pub use booking_repository::PostgresBookingRepository;
pub use catalog::PostgresPricingCatalog;
pub use inquiry_repository::PostgresInquiryRepository;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens a pool against `url` and runs pending migrations if configured.
pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(url)
        .await
        .map_err(|e| db_error("connect to database", e))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to run migrations: {}", e))
            })?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}

/// Wraps a sqlx error with what was being attempted.
pub(crate) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// True when `e` is a unique-constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|d| d.is_unique_violation())
        .unwrap_or(false)
}

/// Reads one column, naming it in the error.
pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to get {}: {}", name, e)))
}
