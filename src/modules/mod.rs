pub mod admins;
pub mod auth;
pub mod crud;
pub mod health;
pub mod identity;
pub mod roles;
pub mod students;
pub mod teachers;
