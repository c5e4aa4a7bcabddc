//! Bookbay Authentication
//!
//! This crate provides JWT-based bearer tokens and argon2 password
//! hashing for Bookbay. Tokens are stateless: validity is determined
//! entirely by signature and expiry, with no server-side session or
//! revocation list.

pub mod error;
pub mod jwt;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use password::{hash_password, verify_password};
