//! Ustoz Top API
//!
//! Teacher-discovery backend: account registration/login with JWT bearer
//! auth, teacher-profile CRUD with image upload, and a like counter that
//! orders the public directory.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use infrastructure::account::{
    AccountService, Argon2Hasher, InMemoryUserRepository, PostgresUserRepository,
};
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::storage::{self, PostgresConfig, PostgresMigrator};
use infrastructure::teacher::{
    InMemoryTeacherRepository, PostgresTeacherRepository, TeacherService,
};
use infrastructure::uploads::FsImageStore;

/// Build the application state from configuration: connect storage, run
/// migrations and wire the services.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt = Arc::new(JwtService::new(JwtConfig::new(
        &config.auth.jwt_secret,
        config.auth.token_expiration_hours,
    )));

    let hasher = Arc::new(Argon2Hasher::new());

    let image_store = Arc::new(FsImageStore::new(
        &config.uploads.dir,
        &config.uploads.public_path,
    ));

    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage backend");

            let users = Arc::new(InMemoryUserRepository::new());
            let teachers = Arc::new(InMemoryTeacherRepository::new(users.clone()));

            Ok(AppState::new(
                Arc::new(AccountService::new(users, hasher, jwt.clone())),
                Arc::new(TeacherService::new(teachers)),
                jwt,
                image_store,
            ))
        }
        StorageBackend::Postgres => {
            info!("Using PostgreSQL storage backend");

            let pg_config = PostgresConfig::new(&config.storage.url)
                .with_max_connections(config.storage.max_connections);
            let pool = storage::connect(&pg_config).await?;

            PostgresMigrator::new(pool.clone()).run().await?;

            let users = Arc::new(PostgresUserRepository::new(pool.clone()));
            let teachers = Arc::new(PostgresTeacherRepository::new(pool));

            Ok(AppState::new(
                Arc::new(AccountService::new(users, hasher, jwt.clone())),
                Arc::new(TeacherService::new(teachers)),
                jwt,
                image_store,
            ))
        }
    }
}
