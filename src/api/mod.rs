//! HTTP API layer

pub mod auth;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod teachers;
pub mod types;

pub use router::create_router_with_state;
pub use state::AppState;
