//! Bookbay REST API
//!
//! This crate provides the Axum-based HTTP API for Bookbay: user
//! signup/login and the token-gated book catalog.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
