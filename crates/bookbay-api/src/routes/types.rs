//! Request/Response DTOs

use bookbay_db::Book;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Signup/login request; fields are optional so that absent values can be
/// rejected with the service's own error body instead of a deserializer error
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Generic confirmation message
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================== Book Types ====================

/// Book payload for create and full-replace update
///
/// All six fields are required; they are optional here only so validation
/// can distinguish a missing `price`/`rating` from a literal `0`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub published_date: Option<NaiveDate>,
}

/// Book list query parameters
#[derive(Deserialize, Default)]
pub struct BooksQuery {
    pub author: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub title: Option<String>,
}

/// Book response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub published_date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            category: book.category,
            price: book.price,
            rating: book.rating,
            published_date: book.published_date,
            created_at: book.created_at.to_rfc3339(),
            updated_at: book.updated_at.to_rfc3339(),
        }
    }
}
