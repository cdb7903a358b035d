use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ideas::repo::{split_categories, Idea};

/// Request body shared by create and update.
#[derive(Debug, Deserialize)]
pub struct IdeaPayload {
    #[serde(default)]
    pub title: String,
    pub notes: Option<String>,
    pub categories: Option<Vec<String>>,
    pub excitement: Option<i64>,
}

/// An idea as returned to the client, categories reconstituted into a list.
#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub notes: String,
    pub categories: Vec<String>,
    pub excitement: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Idea> for IdeaResponse {
    fn from(idea: Idea) -> Self {
        Self {
            id: idea.id,
            user_id: idea.user_id,
            title: idea.title,
            notes: idea.notes,
            categories: split_categories(&idea.categories),
            excitement: idea.excitement,
            created_at: idea.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
