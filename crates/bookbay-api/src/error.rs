//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookbay_auth::AuthError;
use bookbay_db::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Token missing")]
    TokenMissing,

    #[error("Token invalid")]
    TokenInvalid,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::UserExists => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
            ApiError::UserNotFound => (StatusCode::BAD_REQUEST, "User not found".to_string()),
            ApiError::InvalidPassword => {
                (StatusCode::UNAUTHORIZED, "Invalid password".to_string())
            }
            ApiError::TokenMissing => (StatusCode::UNAUTHORIZED, "Token missing".to_string()),
            ApiError::TokenInvalid => (StatusCode::FORBIDDEN, "Token invalid".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Duplicate inserts surface when concurrent signups race past the
            // handler's existence check; the unique constraint is authoritative.
            ApiError::Database(DbError::Duplicate(_)) => {
                (StatusCode::BAD_REQUEST, "User already exists".to_string())
            }
            // Catch-all boundary: unanticipated store/crypto failures become a
            // structured 500 instead of a bare framework response.
            ApiError::Database(_) | ApiError::Auth(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
