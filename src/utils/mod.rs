//! Shared utilities.
//!
//! - [`errors`]: HTTP error type and the mapping from service errors
//! - [`db`]: SQLite error interpretation and query text helpers
//! - [`params`]: Path parameter parsing

pub mod db;
pub mod errors;
pub mod params;
