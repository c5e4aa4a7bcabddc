//! Bookbay Database Layer
//!
//! This crate provides the database abstraction layer for Bookbay,
//! using SQLite via sqlx for persistence.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::{BookFilter, Database};
