//! # ECAM DB
//!
//! SQLite connection pool and schema migrations for the ECAM API.
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary at compile time.
//!
//! # Example
//!
//! ```ignore
//! use ecam_config::DatabaseConfig;
//! use ecam_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::str::FromStr;
use std::time::Duration;

use ecam_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::info;

// Re-export SqlitePool for convenience
pub use sqlx::SqlitePool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a SQLite connection pool.
///
/// The database file is created when missing. Every connection has foreign
/// key enforcement switched on, which the role tables rely on for cascade
/// delete, and waits up to five seconds on a locked database before failing.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or the first connection
/// cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    info!(url = %config.url, max_connections = config.max_connections, "Opening SQLite pool");

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Starts a write transaction that takes the database write lock up front.
///
/// Check-then-insert sequences run inside one of these so two writers cannot
/// both pass the check.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Applies every pending migration.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let pool = init_db_pool(&memory_config()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('persons', 'admins', 'students', 'teachers') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["admins", "persons", "students", "teachers"]);
    }

    #[tokio::test]
    async fn test_begin_immediate_commits() {
        let pool = init_db_pool(&memory_config()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let mut tx = begin_immediate(&pool).await.unwrap();
        sqlx::query("INSERT INTO persons (email, password, created_at) VALUES ('a@b.com', 'x', '2025-01-01T00:00:00Z')")
            .execute(&mut *tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM persons")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = init_db_pool(&memory_config()).await.unwrap();

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(enabled, 1);
    }
}
