//! # ECAM Auth
//!
//! Roles, token claims and token issuing for the ECAM API.
//!
//! - [`role`]: The closed set of roles an identity can hold
//! - [`claims`]: The signed payload carried by every access token
//! - [`jwt`]: [`TokenIssuer`], which signs and verifies tokens
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use ecam_auth::{Role, TokenIssuer};
//! use ecam_config::JwtConfig;
//!
//! let issuer = TokenIssuer::new(&JwtConfig::from_env());
//!
//! let token = issuer.issue(42, Role::Student, Duration::hours(1))?;
//! let claims = issuer.verify(&token)?;
//! assert_eq!(claims.id, 42);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::TokenIssuer;
pub use role::Role;
