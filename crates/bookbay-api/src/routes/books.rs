//! Book catalog routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use bookbay_db::{BookFilter, NewBook};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::{BookPayload, BookResponse, BooksQuery, MessageResponse};

// ==================== Input Validation ====================

/// Require all six book fields
///
/// A `price` or `rating` of 0 is valid; only absent (or JSON null) values
/// are rejected. Empty strings count as missing, matching the null checks
/// this service applies elsewhere.
fn validate_payload(payload: BookPayload) -> Result<NewBook, ApiError> {
    match (
        payload.title,
        payload.author,
        payload.category,
        payload.price,
        payload.rating,
        payload.published_date,
    ) {
        (Some(title), Some(author), Some(category), Some(price), Some(rating), Some(published_date))
            if !title.is_empty() && !author.is_empty() && !category.is_empty() =>
        {
            Ok(NewBook {
                title,
                author,
                category,
                price,
                rating,
                published_date,
            })
        }
        _ => Err(ApiError::BadRequest("Missing book fields".to_string())),
    }
}

// ==================== Book Routes ====================

/// POST /books
async fn create_book(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let new_book = validate_payload(payload)?;

    debug!("Creating book: {}", new_book.title);

    let book = state.db.insert_book(new_book).await?;

    info!("Created book {} ({})", book.id, book.title);

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// GET /books
async fn list_books(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let filter = BookFilter {
        author: query.author,
        category: query.category,
        min_rating: query.rating,
        title: query.title,
    };

    let books = state.db.list_books(&filter).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/{id}
async fn get_book(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .db
        .get_book_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    Ok(Json(book.into()))
}

/// PUT /books/{id}
///
/// Full-replace semantics: every field is required and overwritten. Callers
/// must resend the complete record; there is no partial patch.
async fn update_book(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<BookResponse>, ApiError> {
    let replacement = validate_payload(payload)?;

    debug!("Updating book: {}", id);

    let updated = state.db.update_book(id, replacement).await?;
    if !updated {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }

    let book = state
        .db
        .get_book_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    info!("Updated book {} ({})", book.id, book.title);

    Ok(Json(book.into()))
}

/// DELETE /books/{id}
async fn delete_book(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!("Deleting book: {}", id);

    let deleted = state.db.delete_book(id).await?;

    if deleted {
        info!("Deleted book: {}", id);
        Ok(Json(MessageResponse {
            message: "Book deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Book not found".to_string()))
    }
}

/// Create book routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(create_book))
        .route("/books", get(list_books))
        .route("/books/{id}", get(get_book))
        .route("/books/{id}", put(update_book))
        .route("/books/{id}", delete(delete_book))
}
