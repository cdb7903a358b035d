use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    ideas::{
        dto::{IdeaPayload, IdeaResponse, SuccessResponse},
        repo::{self, join_categories},
    },
    state::AppState,
};

pub fn idea_routes() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/:id", put(update_idea).delete(delete_idea))
}

/// Excitement is optional and clamps nothing: out-of-range values are
/// rejected, absent or zero values fall back to the default of 5.
fn normalize_excitement(excitement: Option<i64>) -> Result<i64, ApiError> {
    match excitement {
        None | Some(0) => Ok(5),
        Some(e) if (1..=10).contains(&e) => Ok(e),
        Some(_) => Err(ApiError::Validation("Excitement must be 1-10".into())),
    }
}

#[instrument(skip(state))]
pub async fn list_ideas(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<IdeaResponse>>, ApiError> {
    let ideas = repo::list_by_user(&state.db, user.id).await?;
    Ok(Json(ideas.into_iter().map(IdeaResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<IdeaPayload>,
) -> Result<Json<IdeaResponse>, ApiError> {
    if payload.title.is_empty() {
        return Err(ApiError::Validation("Title required".into()));
    }
    let excitement = normalize_excitement(payload.excitement)?;
    let notes = payload.notes.unwrap_or_default();
    let categories = join_categories(&payload.categories.unwrap_or_default());

    let idea = repo::insert(
        &state.db,
        user.id,
        &payload.title,
        &notes,
        &categories,
        excitement,
    )
    .await?;

    info!(user_id = user.id, idea_id = idea.id, "idea created");
    Ok(Json(IdeaResponse::from(idea)))
}

// Unlike create, an empty title is written as provided here.
#[instrument(skip(state, payload))]
pub async fn update_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(idea_id): Path<i64>,
    Json(payload): Json<IdeaPayload>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let excitement = normalize_excitement(payload.excitement)?;
    let notes = payload.notes.unwrap_or_default();
    let categories = join_categories(&payload.categories.unwrap_or_default());

    let touched = repo::update(
        &state.db,
        user.id,
        idea_id,
        &payload.title,
        &notes,
        &categories,
        excitement,
    )
    .await?;
    if touched == 0 {
        return Err(ApiError::NotFound("Idea"));
    }

    info!(user_id = user.id, idea_id, "idea updated");
    Ok(Json(SuccessResponse { success: true }))
}

#[instrument(skip(state))]
pub async fn delete_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(idea_id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let touched = repo::delete(&state.db, user.id, idea_id).await?;
    if touched == 0 {
        return Err(ApiError::NotFound("Idea"));
    }

    info!(user_id = user.id, idea_id, "idea deleted");
    Ok(Json(SuccessResponse { success: true }))
}
