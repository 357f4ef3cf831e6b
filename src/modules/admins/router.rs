use axum::{Router, middleware};

use crate::middleware::role::require_admin;
use crate::modules::admins::entity::AdminRole;
use crate::modules::roles::router::{init_role_admin_router, init_role_self_router};
use crate::state::AppState;

pub fn init_admins_router(state: &AppState) -> Router<AppState> {
    init_role_admin_router::<AdminRole>(state).merge(
        init_role_self_router::<AdminRole>()
            .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
    )
}
