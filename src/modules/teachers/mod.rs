pub mod entity;
pub mod router;

pub use entity::TeacherRole;
pub use router::init_teachers_router;
