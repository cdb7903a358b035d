use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

/// An idea row as stored: categories are a single comma-joined text field.
#[derive(Debug, Clone, FromRow)]
pub struct Idea {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub notes: String,
    pub categories: String,
    pub excitement: i64,
    pub created_at: OffsetDateTime,
}

pub fn join_categories(categories: &[String]) -> String {
    categories.join(",")
}

pub fn split_categories(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        Vec::new()
    } else {
        stored.split(',').map(str::to_string).collect()
    }
}

pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> Result<Vec<Idea>, sqlx::Error> {
    sqlx::query_as::<_, Idea>(
        r#"
        SELECT id, user_id, title, notes, categories, excitement, created_at
        FROM ideas
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    user_id: i64,
    title: &str,
    notes: &str,
    categories: &str,
    excitement: i64,
) -> Result<Idea, sqlx::Error> {
    sqlx::query_as::<_, Idea>(
        r#"
        INSERT INTO ideas (user_id, title, notes, categories, excitement, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, title, notes, categories, excitement, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(notes)
    .bind(categories)
    .bind(excitement)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await
}

/// Returns the number of rows touched; zero means the idea does not exist
/// or belongs to someone else.
pub async fn update(
    db: &SqlitePool,
    user_id: i64,
    idea_id: i64,
    title: &str,
    notes: &str,
    categories: &str,
    excitement: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE ideas SET title = ?, notes = ?, categories = ?, excitement = ?
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(title)
    .bind(notes)
    .bind(categories)
    .bind(excitement)
    .bind(idea_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(db: &SqlitePool, user_id: i64, idea_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ideas WHERE id = ? AND user_id = ?")
        .bind(idea_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
