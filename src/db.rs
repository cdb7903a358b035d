use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    // ON DELETE CASCADE only fires with the foreign_keys pragma enabled.
    let options = SqliteConnectOptions::from_str(database_url)
        .context("parse DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(pool)
}

/// Ensures the schema exists. Safe to run on every startup.
pub async fn init_schema(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(db)
    .await
    .context("create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ideas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            categories TEXT NOT NULL DEFAULT '',
            excitement INTEGER NOT NULL DEFAULT 5 CHECK(excitement >= 1 AND excitement <= 10),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(db)
    .await
    .context("create ideas table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ideas_user_id ON ideas(user_id)")
        .execute(db)
        .await
        .context("create ideas user_id index")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let db = memory_pool().await;
        init_schema(&db).await.expect("first run");
        init_schema(&db).await.expect("second run");
    }

    #[tokio::test]
    async fn excitement_check_constraint_rejects_out_of_range() {
        let db = memory_pool().await;
        init_schema(&db).await.expect("schema");
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ('u', 'h')")
            .execute(&db)
            .await
            .expect("user row");
        let err = sqlx::query(
            "INSERT INTO ideas (user_id, title, excitement) VALUES (1, 't', 11)",
        )
        .execute(&db)
        .await
        .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("check"));
    }
}
