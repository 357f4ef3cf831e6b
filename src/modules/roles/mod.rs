//! Machinery shared by the admin, student and teacher modules.

pub mod controller;
pub mod entity;
pub mod router;
pub mod service;

pub use entity::RoleEntity;
pub use service::RoleService;
