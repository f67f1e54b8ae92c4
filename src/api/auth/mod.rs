//! Authentication API endpoints
//!
//! Registration and login for JWT-based authentication.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserRole};
use crate::domain::DomainError;
use crate::infrastructure::account::RegisterRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}

/// Register a new account
///
/// POST /api/auth/register
///
/// Returns the public view of the created user; the password hash is never
/// echoed.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .account_service
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// Login with email and password
///
/// POST /api/auth/login
///
/// Returns a bearer token on successful authentication. Both an unknown
/// email and a wrong password answer 400, never 404.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state
        .account_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { message } => ApiError::bad_request(message),
            DomainError::InvalidCredentials { message } => ApiError::bad_request(message),
            other => other.into(),
        })?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(Json(LoginResponse {
        user: UserResponse::from_user(&outcome.user),
        token: outcome.token,
        expires_at: expires_at.to_rfc3339(),
    }))
}
