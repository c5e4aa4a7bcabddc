//! Authentication gate and signup/login routes

use axum::{
    Json, Router,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    routing::post,
};
use bookbay_auth::{hash_password, verify_password};
use bookbay_db::NewUser;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{CredentialsRequest, MessageResponse, TokenResponse};

/// Authenticated user attached to the request by the gate
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

// ==================== Authentication Gate ====================

/// Extractor guarding protected routes
///
/// Missing or non-Bearer Authorization header short-circuits with 401;
/// a token that fails signature or expiry checks short-circuits with 403.
/// The decoded identity is trusted as-is; the gate never queries the
/// credential store.
pub struct RequireAuth(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::TokenMissing)?;

        let claims = app_state
            .jwt
            .validate_token(token)
            .map_err(|_| ApiError::TokenInvalid)?;

        debug!("Authenticated user: {}", claims.sub);

        Ok(RequireAuth(AuthUser { email: claims.sub }))
    }
}

// ==================== Auth Routes ====================

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Email and password required".to_string(),
            ));
        }
    };

    debug!("Signup attempt for user: {}", email);

    if state.db.get_user_by_email(&email).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    let password_hash = hash_password(&password)?;

    let user = state
        .db
        .insert_user(NewUser {
            email,
            password_hash,
        })
        .await?;

    info!("Registered user: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::BadRequest(
                "Email and password required".to_string(),
            ));
        }
    };

    debug!("Login attempt for user: {}", email);

    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(ApiError::InvalidPassword);
    }

    let token = state.jwt.generate_token(&user.email)?;

    info!("User {} logged in successfully", user.email);

    Ok(Json(TokenResponse { token }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
