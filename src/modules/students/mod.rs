pub mod entity;
pub mod router;

pub use entity::StudentRole;
pub use router::init_students_router;
