//! Route table

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::teachers;

/// Create the full router with application state.
///
/// `uploads_dir` is the directory stored images are served from under
/// `/uploads`.
pub fn create_router_with_state(state: AppState, uploads_dir: &str) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Service banner
        .route("/", get(|| async { "Ustoz Top API" }))
        // Authentication endpoints (no auth required)
        .nest("/api/auth", auth::create_auth_router())
        // Teacher directory
        .nest("/api/teachers", teachers::create_teachers_router())
        // Uploaded images
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
