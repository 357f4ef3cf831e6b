use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ecam_models::{CountResponse, ErrorResponse, SearchParams};
use serde_json::Value;
use tracing::instrument;

use crate::modules::crud::registry::{CrudOperation, CrudOutcome, CrudRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::params::parse_id;
use crate::validator::JsonBody;

impl IntoResponse for CrudOutcome {
    fn into_response(self) -> Response {
        match self {
            CrudOutcome::Items(items) => Json(items).into_response(),
            CrudOutcome::Item(item) => Json(item).into_response(),
            CrudOutcome::Count(count) => Json(count).into_response(),
            CrudOutcome::Created(item) => (StatusCode::CREATED, Json(item)).into_response(),
            CrudOutcome::Deleted => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

async fn dispatch(state: &AppState, request: CrudRequest) -> Result<CrudOutcome, AppError> {
    Ok(state.crud.dispatch(request).await?)
}

#[utoipa::path(
    get,
    path = "/api/crud/{table}",
    params(
        ("table" = String, Path, description = "Registered table name, case-insensitive"),
        SearchParams
    ),
    responses(
        (status = 200, description = "Rows of the table, filtered when q is given", body = Vec<Object>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state))]
pub async fn list_rows(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<CrudOutcome, AppError> {
    let request = CrudRequest::new(table, CrudOperation::List).with_query(params.q);
    dispatch(&state, request).await
}

#[utoipa::path(
    get,
    path = "/api/crud/{table}/count",
    params(("table" = String, Path, description = "Registered table name, case-insensitive")),
    responses(
        (status = 200, description = "Row count", body = CountResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state))]
pub async fn count_rows(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<CrudOutcome, AppError> {
    dispatch(&state, CrudRequest::new(table, CrudOperation::Count)).await
}

#[utoipa::path(
    get,
    path = "/api/crud/{table}/by/{id}",
    params(
        ("table" = String, Path, description = "Registered table name, case-insensitive"),
        ("id" = i64, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "The row", body = Object),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table or row", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state))]
pub async fn get_row(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<CrudOutcome, AppError> {
    let request = CrudRequest::new(table, CrudOperation::GetById).with_id(parse_id(&id)?);
    dispatch(&state, request).await
}

#[utoipa::path(
    post,
    path = "/api/crud/{table}",
    params(("table" = String, Path, description = "Registered table name, case-insensitive")),
    request_body = Object,
    responses(
        (status = 201, description = "Row created", body = Object),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state, body))]
pub async fn create_row(
    State(state): State<AppState>,
    Path(table): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<CrudOutcome, AppError> {
    let request = CrudRequest::new(table, CrudOperation::Create).with_body(body);
    dispatch(&state, request).await
}

#[utoipa::path(
    put,
    path = "/api/crud/{table}/by/{id}",
    params(
        ("table" = String, Path, description = "Registered table name, case-insensitive"),
        ("id" = i64, Path, description = "Row ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Row updated", body = Object),
        (status = 400, description = "Invalid body or ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table or row", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state, body))]
pub async fn update_row(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<CrudOutcome, AppError> {
    let request = CrudRequest::new(table, CrudOperation::Update)
        .with_id(parse_id(&id)?)
        .with_body(body);
    dispatch(&state, request).await
}

#[utoipa::path(
    delete,
    path = "/api/crud/{table}/by/{id}",
    params(
        ("table" = String, Path, description = "Registered table name, case-insensitive"),
        ("id" = i64, Path, description = "Row ID")
    ),
    responses(
        (status = 204, description = "Row deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Unknown table or row", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "CRUD"
)]
#[instrument(skip(state))]
pub async fn delete_row(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<CrudOutcome, AppError> {
    let request = CrudRequest::new(table, CrudOperation::Delete).with_id(parse_id(&id)?);
    dispatch(&state, request).await
}
