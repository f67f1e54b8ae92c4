//! Domain layer: entities, repository traits and errors

mod error;
pub mod teacher;
pub mod user;

pub use error::DomainError;
