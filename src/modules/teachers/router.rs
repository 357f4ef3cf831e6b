use axum::{Router, middleware};

use crate::middleware::role::require_teacher;
use crate::modules::roles::router::{init_role_admin_router, init_role_self_router};
use crate::modules::teachers::entity::TeacherRole;
use crate::state::AppState;

pub fn init_teachers_router(state: &AppState) -> Router<AppState> {
    init_role_admin_router::<TeacherRole>(state).merge(
        init_role_self_router::<TeacherRole>()
            .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher)),
    )
}
