//! # ECAM Models
//!
//! Domain records and DTOs for the ECAM API.
//!
//! # Modules
//!
//! - [`ids`]: Typed integer ids per table
//! - [`persons`]: The shared identity record and its create/update payloads
//! - [`admins`], [`students`], [`teachers`]: Role records and their DTOs
//! - [`auth`]: Login request/response shapes
//! - [`common`]: Count, message and error payloads plus search parameters
//! - [`profile`]: Which fields a role may change on its own record
//!
//! Outgoing and incoming JSON uses camelCase names.

pub mod admins;
pub mod auth;
pub mod common;
pub mod ids;
pub mod persons;
pub mod profile;
pub mod students;
pub mod teachers;

// Re-export commonly used types at crate root for convenience
pub use admins::{Admin, AdminDto, CreateAdminDto, UpdateAdminDto};
pub use auth::{LoginRequest, LoginResponse, MeResponse};
pub use common::{CountResponse, ErrorResponse, MessageResponse, SearchParams};
pub use ids::{AdminId, IdentityId, StudentId, TeacherId};
pub use persons::{Person, PersonCreate, PersonUpdate};
pub use profile::{ProfileField, SelfServiceUpdate, sanitize_self_update, self_service_fields};
pub use students::{CreateStudentDto, Student, StudentDto, UpdateStudentDto};
pub use teachers::{CreateTeacherDto, Teacher, TeacherDto, UpdateTeacherDto};
