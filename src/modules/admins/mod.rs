pub mod entity;
pub mod router;

pub use entity::AdminRole;
pub use router::init_admins_router;
