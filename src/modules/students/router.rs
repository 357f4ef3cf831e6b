use axum::{Router, middleware};

use crate::middleware::role::require_student;
use crate::modules::roles::router::{init_role_admin_router, init_role_self_router};
use crate::modules::students::entity::StudentRole;
use crate::state::AppState;

pub fn init_students_router(state: &AppState) -> Router<AppState> {
    init_role_admin_router::<StudentRole>(state).merge(
        init_role_self_router::<StudentRole>()
            .route_layer(middleware::from_fn_with_state(state.clone(), require_student)),
    )
}
