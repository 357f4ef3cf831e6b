//! Handlers shared by every role route group.
//!
//! Each handler is generic over the [`RoleEntity`] it serves; the admin,
//! student and teacher routers instantiate them for their own role.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ecam_models::{CountResponse, MessageResponse, SearchParams, sanitize_self_update};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::roles::entity::RoleEntity;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::params::parse_id;
use crate::validator::ValidatedJson;

fn not_found<R: RoleEntity>() -> AppError {
    AppError::not_found(anyhow::anyhow!("{} not found", R::LABEL))
}

#[instrument(skip(state))]
pub async fn list<R: RoleEntity>(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<R::Dto>>, AppError> {
    let service = state.role_service::<R>();
    let items = match params.query() {
        Some(q) => service.search(&state.db, q).await?,
        None => service.get_all(&state.db).await?,
    };
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn count<R: RoleEntity>(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.role_service::<R>().count(&state.db).await?;
    Ok(Json(CountResponse { count }))
}

#[instrument(skip(state))]
pub async fn get_by_id<R: RoleEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Dto>, AppError> {
    let id = R::Id::from(parse_id(&id)?);
    state
        .role_service::<R>()
        .get_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(not_found::<R>)
}

#[instrument(skip(state, dto))]
pub async fn create<R: RoleEntity>(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R::Dto>), AppError> {
    let created = state
        .role_service::<R>()
        .create_from_dto(&state.db, &dto)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, dto))]
pub async fn update<R: RoleEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<R::Update>,
) -> Result<Json<R::Dto>, AppError> {
    let id = R::Id::from(parse_id(&id)?);
    let updated = state
        .role_service::<R>()
        .update(&state.db, id, &dto)
        .await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete<R: RoleEntity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = R::Id::from(parse_id(&id)?);
    if !state.role_service::<R>().delete(&state.db, id).await? {
        return Err(not_found::<R>());
    }

    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        R::LABEL
    ))))
}

/// The caller's own record, looked up by the identity in their token.
#[instrument(skip(state))]
pub async fn get_me<R: RoleEntity>(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<R::Dto>, AppError> {
    state
        .role_service::<R>()
        .get_by_identity(&state.db, auth_user.identity_id())
        .await?
        .map(Json)
        .ok_or_else(not_found::<R>)
}

/// Updates the caller's own record with only the fields their role may
/// change on itself.
#[instrument(skip(state, dto))]
pub async fn update_me<R: RoleEntity>(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<R::Update>,
) -> Result<Json<R::Dto>, AppError> {
    let service = state.role_service::<R>();
    let id = service
        .find_id_by_identity(&state.db, auth_user.identity_id())
        .await?
        .ok_or_else(not_found::<R>)?;

    let dto = sanitize_self_update(auth_user.role(), dto);
    let updated = service.update(&state.db, id, &dto).await?;
    Ok(Json(updated))
}
