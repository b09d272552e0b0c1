//! SQLite pool construction and table DDL. Tables are created if absent; there is no versioned migration.

use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a pool for `database_url`, creating the database file if it does not exist.
/// In-memory databases are per connection, so they get exactly one long-lived connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: format!("{}: {}", database_url, e),
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(opts)
            .await?
    };
    Ok(pool)
}

/// Round-trip a trivial query. Any failure means the service is not ready.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        tracing::warn!(error = %e, "readiness check failed");
        AppError::Unavailable("database unavailable".into())
    })?;
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "admins",
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    ),
    (
        "sneakers",
        r#"
        CREATE TABLE IF NOT EXISTS sneakers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            model TEXT NOT NULL,
            brand TEXT NOT NULL
        )
        "#,
    ),
    (
        "sneakers_information",
        r#"
        CREATE TABLE IF NOT EXISTS sneakers_information (
            sneaker_id INTEGER PRIMARY KEY REFERENCES sneakers(id) ON DELETE CASCADE,
            main_info TEXT NOT NULL DEFAULT '',
            main_image_url TEXT NOT NULL DEFAULT '',
            additional_info TEXT NOT NULL DEFAULT ''
        )
        "#,
    ),
    (
        "product_providers",
        r#"
        CREATE TABLE IF NOT EXISTS product_providers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            provider_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "provider_information",
        r#"
        CREATE TABLE IF NOT EXISTS provider_information (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES sneakers(id) ON DELETE CASCADE,
            provider_id INTEGER NOT NULL REFERENCES product_providers(id) ON DELETE CASCADE,
            price REAL NOT NULL,
            available BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "availability_scrappers",
        r#"
        CREATE TABLE IF NOT EXISTS availability_scrappers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES sneakers(id) ON DELETE CASCADE,
            provider_id INTEGER NOT NULL REFERENCES product_providers(id) ON DELETE CASCADE,
            search_for TEXT NOT NULL
        )
        "#,
    ),
];

/// Create every application table that does not exist yet.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}
