//! Authentication infrastructure - JWT signing and verification

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
