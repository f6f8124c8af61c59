/**
 * Server Configuration
 *
 * Opens the SQLite pool described by `AppConfig` and brings the schema
 * up to date.
 *
 * # Connection Modes
 *
 * - File URLs (`sqlite://platewise.db?mode=rwc`) get a small pool and
 *   the file is created when missing.
 * - In-memory URLs (`sqlite::memory:`) get exactly one connection that
 *   never idles out; every connection to `:memory:` is its own database,
 *   so a second connection would see empty tables.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::AppConfig;

const FILE_POOL_SIZE: u32 = 8;

/// Connect to the configured database and run migrations
///
/// # Errors
///
/// Fails when the URL cannot be parsed, the database cannot be opened, or
/// a migration fails to apply.
pub async fn load_database(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    tracing::info!("Connecting to database...");

    let pool = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(FILE_POOL_SIZE)
            .connect_with(options)
            .await?
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Fresh migrated in-memory database for unit tests
#[cfg(test)]
pub(crate) async fn connect_memory() -> SqlitePool {
    let config = AppConfig::builder()
        .database_url("sqlite::memory:")
        .build()
        .expect("in-memory config is valid");
    load_database(&config)
        .await
        .expect("in-memory database opens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_is_migrated() {
        let pool = connect_memory().await;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_memory_database_keeps_state() {
        let pool = connect_memory().await;
        sqlx::query("INSERT INTO users (id, username, password_hash, date_created, date_updated) VALUES (x'01', 'a', 'h', 'now', 'now')")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
