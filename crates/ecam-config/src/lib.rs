//! # ECAM Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing key, issuer, audience and lifetime
//! - [`database`]: SQLite connection settings
//! - [`cors`]: Allowed browser origins
//! - [`server`]: Listen address and password hashing cost
//!
//! Every struct is read once at startup and handed to the components that
//! need it. Nothing here is mutated afterwards.
//!
//! # Example
//!
//! ```ignore
//! use ecam_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, falling back when it is unset or
/// does not parse.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
