//! # Aristokrat DB
//!
//! PostgreSQL connection pool, embedded migrations and small query helpers.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//!
//! # Example
//!
//! ```ignore
//! use aristokrat_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;

use anyhow::Context;
use aristokrat_core::AppError;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Migrations live at the workspace root so `#[sqlx::test]` can find them too.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Opens the connection pool described by `DATABASE_URL`.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Turns a unique-constraint violation into `409 Conflict` with `message`;
/// any other error becomes a database error.
pub fn unique_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(message);
        }
    }
    AppError::database(err)
}

/// Turns a foreign-key violation into `400 Bad Request` with `message`.
pub fn foreign_key_violation(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow::anyhow!(message.to_string()));
        }
    }
    AppError::database(err)
}

/// Builds an `ILIKE` pattern matching `search` anywhere, with wildcards in
/// the input taken literally. Blank input means "no filter".
pub fn contains_pattern(search: Option<&str>) -> Option<String> {
    let search = search.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(Some("12")).as_deref(), Some("%12%"));
        assert_eq!(contains_pattern(Some("1%_")).as_deref(), Some("%1\\%\\_%"));
        assert_eq!(contains_pattern(Some("a\\b")).as_deref(), Some("%a\\\\b%"));
    }

    #[test]
    fn test_contains_pattern_blank_is_none() {
        assert_eq!(contains_pattern(None), None);
        assert_eq!(contains_pattern(Some("   ")), None);
        assert_eq!(contains_pattern(Some(" 7 ")).as_deref(), Some("%7%"));
    }
}
