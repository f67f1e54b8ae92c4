//! Account service for registration and login

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::user::{
    validate_email, validate_name, validate_password, User, UserRepository, UserRole,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Successful login result
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Account service: registration and credential verification
#[derive(Debug)]
pub struct AccountService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    jwt: Arc<dyn JwtGenerator>,
}

impl<R: UserRepository, H: PasswordHasher> AccountService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>, jwt: Arc<dyn JwtGenerator>) -> Self {
        Self {
            repository,
            hasher,
            jwt,
        }
    }

    /// Register a new account: validate, hash and persist.
    /// Email uniqueness is enforced by the repository.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&request.password)?;

        let user = User::new(
            request.name.trim(),
            &request.email,
            password_hash,
            request.role,
        );

        let user = self.repository.create(user).await?;
        debug!(user_id = %user.id(), role = %user.role(), "Registered new account");

        Ok(user)
    }

    /// Authenticate by unique email lookup and hash verification, then
    /// issue a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        if !self.hasher.verify(password, user.password_hash()) {
            warn!(user_id = %user.id(), "Login rejected: password mismatch");
            return Err(DomainError::invalid_credentials("Invalid password"));
        }

        let token = self.jwt.generate(user.identity())?;
        debug!(user_id = %user.id(), "Login succeeded");

        Ok(LoginOutcome { user, token })
    }
}
