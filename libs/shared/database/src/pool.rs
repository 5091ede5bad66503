use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::schema;

/// How long a connection waits for another writer before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the connection pool described by `config`. Foreign keys are
/// enforced on every connection. File databases run in WAL mode so readers
/// do not block the single writer.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let mut options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.database_max_connections.max(1));

    // Every connection to an in-memory database is a separate database.
    if is_in_memory(&config.database_url) {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = pool_options.connect_with(options).await?;
    info!("Connected to database {}", config.database_url);
    Ok(pool)
}

/// Starts a transaction holding the write lock from `BEGIN`, so concurrent
/// writers wait on the busy timeout instead of failing a lock upgrade.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Creates tables and indexes that do not exist yet.
pub async fn initialize(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = begin_immediate(pool).await?;
    for statement in schema::statements() {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    debug!("Database schema is up to date");
    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:test?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://hospital.db?mode=rwc"));
    }

    #[tokio::test]
    async fn initialize_is_repeatable() {
        let pool = connect(&AppConfig::default()).await.unwrap();
        initialize(&pool).await.unwrap();
        initialize(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();

        assert_eq!(names, vec!["appointments", "departments", "sessions", "treatments", "users"]);
    }
}
