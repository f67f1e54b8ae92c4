//! Teacher directory infrastructure - repositories and service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresTeacherRepository;
pub use repository::InMemoryTeacherRepository;
pub use service::TeacherService;
