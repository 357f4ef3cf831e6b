//! # ECAM Core
//!
//! Core types shared by every other ECAM crate:
//!
//! - [`errors`]: The typed domain error returned by services
//! - [`password`]: The pluggable password hashing seam
//! - [`validation`]: Email and password acceptance policy
//!
//! # Example
//!
//! ```ignore
//! use ecam_core::{BcryptHasher, PasswordHasher, ServiceError};
//! use ecam_core::validation::require_valid_email;
//!
//! let email = require_valid_email("  alice@school.com ")?;
//! let hasher = BcryptHasher::default();
//! let secret = hasher.hash("pass123")?;
//! ```

pub mod errors;
pub mod password;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{ServiceError, ServiceResult};
pub use password::{BcryptHasher, PasswordHasher};
