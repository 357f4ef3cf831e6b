use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::modules::roles::controller::{
    count, create, delete, get_by_id, get_me, list, update, update_me,
};
use crate::modules::roles::entity::RoleEntity;
use crate::state::AppState;

/// Admin-only management routes for one role table.
pub fn init_role_admin_router<R: RoleEntity>(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create::<R>).get(list::<R>))
        .route("/count", get(count::<R>))
        .route(
            "/by/{id}",
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

/// `/me` routes for one role table. The caller adds the role's guard.
pub fn init_role_self_router<R: RoleEntity>() -> Router<AppState> {
    Router::new().route("/me", get(get_me::<R>).put(update_me::<R>))
}
