//! Account infrastructure - password hashing, repositories and the
//! registration/login service

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{AccountService, LoginOutcome, RegisterRequest};
