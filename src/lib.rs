//! # ECAM API
//!
//! Identity and authorization layer of the ECAM school backend, built with
//! Axum and SQLite.
//!
//! Every person has one identity (`persons`) with name, email and password.
//! Role rows (`admins`, `students`, `teachers`) hang off an identity and are
//! removed with it. Requests carry a bearer token holding the identity id
//! and role; route groups are guarded by role, and admin passes every guard.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # ecam-cli commands (migrate, create-admin, delete-person)
//! ├── middleware/       # AuthUser extractor and role guards
//! ├── modules/
//! │   ├── identity/    # Person store: create, update, credentials
//! │   ├── roles/       # RoleEntity trait, generic RoleService and handlers
//! │   ├── admins/      # Admin role table
//! │   ├── students/    # Student role table
//! │   ├── teachers/    # Teacher role table
//! │   ├── crud/        # /crud/{table} dispatcher
//! │   ├── auth/        # Login and /auth/me
//! │   └── health/      # Liveness and readiness
//! └── utils/            # AppError, SQLite error helpers, path params
//! ```
//!
//! Workspace crates hold the parts with no HTTP in them:
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `ecam-core` | `ServiceError`, password hashing, email/password policy |
//! | `ecam-config` | Environment configuration |
//! | `ecam-db` | Pool and migrations |
//! | `ecam-auth` | `Role`, `Claims`, `TokenIssuer` |
//! | `ecam-models` | Ids, records, DTOs, self-service field policy |
//!
//! ## Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://ecam.db
//! JWT_SECRET=your-secure-secret-key
//! cargo run --bin ecam-cli -- create-admin --email admin@ecam.be
//! cargo run --bin ecam
//! ```
//!
//! API documentation is served at `/scalar`.

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use ecam_auth;
pub use ecam_config;
pub use ecam_core;
pub use ecam_db;
pub use ecam_models;
