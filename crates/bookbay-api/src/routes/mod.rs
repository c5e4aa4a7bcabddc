//! API routes

mod auth;
mod books;
mod types;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::state::AppState;

pub use auth::{AuthUser, RequireAuth};

/// Fallback for unmatched routes
///
/// An unrecognized method on a known path is deliberately indistinguishable
/// from an unknown path: both report 404, never 405.
async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(books::routes())
        .with_state(state)
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}
