//! Validation rules for account registration input

use thiserror::Error;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted display-name length
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name cannot exceed {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    #[error("Email is not valid")]
    InvalidEmail,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong);
    }

    Ok(())
}

/// Validate an email address. Structural check only; deliverability is not
/// our problem.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::InvalidEmail);
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(UserValidationError::InvalidEmail);
    }

    if email.contains(char::is_whitespace) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort);
    }

    Ok(())
}
