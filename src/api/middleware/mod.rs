//! API middleware components

pub mod user_auth;

pub use user_auth::{extract_bearer_token, RequireUser};
