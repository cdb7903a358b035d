use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod claims;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
