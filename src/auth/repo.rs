use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with an already hashed password.
    ///
    /// A unique-constraint violation bubbles up as `sqlx::Error::Database`;
    /// the handler maps it to a conflict.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_db() -> SqlitePool {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::db::init_schema(&db).await.expect("schema");
        db
    }

    #[tokio::test]
    async fn create_then_find_roundtrip() {
        let db = test_db().await;
        let created = User::create(&db, "alice", "phc-hash").await.expect("create");
        let found = User::find_by_username(&db, "alice")
            .await
            .expect("query")
            .expect("present");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "phc-hash");
    }

    #[tokio::test]
    async fn find_unknown_username_is_none() {
        let db = test_db().await;
        let found = User::find_by_username(&db, "nobody").await.expect("query");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let db = test_db().await;
        User::create(&db, "alice", "h1").await.expect("first");
        let err = User::create(&db, "alice", "h2").await.unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
            other => panic!("expected database error, got {other:?}"),
        }
    }
}
