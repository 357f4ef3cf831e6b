use axum::{Router, middleware, routing::get};

use crate::middleware::role::require_admin;
use crate::modules::crud::controller::{
    count_rows, create_row, delete_row, get_row, list_rows, update_row,
};
use crate::state::AppState;

pub fn init_crud_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/{table}", get(list_rows).post(create_row))
        .route("/{table}/count", get(count_rows))
        .route(
            "/{table}/by/{id}",
            get(get_row).put(update_row).delete(delete_row),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}
