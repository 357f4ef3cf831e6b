//! The shared identity store behind every role.

pub mod service;

pub use service::IdentityStore;
