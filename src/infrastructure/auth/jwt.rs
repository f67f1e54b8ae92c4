//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::{Identity, UserId, UserRole};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Account role
    pub role: UserRole,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for an authenticated identity
    pub fn new(identity: Identity, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: identity.id.to_string(),
            role: identity.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Decode the subject back into an identity
    pub fn identity(&self) -> Result<Identity, DomainError> {
        let id = UserId::parse(&self.sub)
            .map_err(|e| DomainError::invalid_id(format!("Invalid subject in token: {}", e)))?;

        Ok(Identity {
            id,
            role: self.role,
        })
    }
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            // 7 days
            expiration_hours: 168,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a signed token for an identity
    fn generate(&self, identity: Identity) -> Result<String, DomainError>;

    /// Validate a token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Get the token expiration time in hours
    fn expiration_hours(&self) -> u64;
}

/// HS256 JWT service with a process-wide secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(JwtConfig::default())
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, identity: Identity) -> Result<String, DomainError> {
        let claims = JwtClaims::new(identity, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        // No leeway: a token past exp is expired, not "close enough"
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::invalid_credentials(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity {
            id: UserId::generate(),
            role: UserRole::Teacher,
        }
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 168))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();
        let identity = test_identity();

        let token = service.generate(identity).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, identity.id.to_string());
        assert_eq!(claims.role, UserRole::Teacher);
        assert!(!claims.is_expired());
        assert_eq!(claims.identity().unwrap(), identity);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        assert!(service.validate("invalid-token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 168));
        let service2 = JwtService::new(JwtConfig::new("secret-2", 168));

        let token = service1.generate(test_identity()).unwrap();

        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new("test-secret", 168));
        let identity = test_identity();

        // Craft claims that expired an hour ago
        let past = Utc::now() - Duration::hours(1);
        let claims = JwtClaims {
            sub: identity.id.to_string(),
            role: identity.role,
            iat: (past - Duration::hours(2)).timestamp(),
            exp: past.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        // Signature is valid but expiry must still reject it
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_just_expired_token_gets_no_leeway() {
        let service = JwtService::new(JwtConfig::new("test-secret", 168));
        let identity = test_identity();

        // Expired 30 seconds ago, inside the library's default 60s leeway
        let now = Utc::now();
        let claims = JwtClaims {
            sub: identity.id.to_string(),
            role: identity.role,
            iat: (now - Duration::hours(1)).timestamp(),
            exp: (now - Duration::seconds(30)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_claims_carry_role() {
        let service = create_service();
        let identity = Identity {
            id: UserId::generate(),
            role: UserRole::User,
        };

        let token = service.generate(identity).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.role, UserRole::User);
    }

    #[test]
    fn test_default_expiration_is_seven_days() {
        let service = JwtService::with_default_config();
        assert_eq!(service.expiration_hours(), 168);
    }
}
