//! Generic `/crud/{table}` access to registered tables.

pub mod controller;
pub mod handler;
pub mod registry;
pub mod router;

pub use handler::{CrudHandler, RoleCrudHandler};
pub use registry::{CrudOperation, CrudOutcome, CrudRegistry, CrudRequest};
pub use router::init_crud_router;
