//! User domain: entity, roles, repository trait and input validation

mod entity;
mod repository;
mod validation;

pub use entity::{Identity, User, UserId, UserRole};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_name, validate_password, UserValidationError, MAX_NAME_LENGTH,
    MIN_PASSWORD_LENGTH,
};
