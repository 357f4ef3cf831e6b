//! Request extractors and route guards.
//!
//! - [`auth`]: [`AuthUser`](auth::AuthUser), the verified bearer token claims
//! - [`role`]: Role guards applied to route groups with `route_layer`
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The route group's guard verifies the token (401 on failure)
//! 3. The guard checks the claimed role against the group's roles (403),
//!    letting admin through regardless
//! 4. The handler extracts `AuthUser`, reusing the guard's claims
//!
//! Handlers that act on "my own record" take the identity from `AuthUser`
//! and never from the path or body.

pub mod auth;
pub mod role;
