//! Role guards for route groups.
//!
//! Every guard admits `admin`, whether or not it is listed. The resolved
//! [`AuthUser`] is stored in the request extensions for the handler.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ecam_auth::Role;
use ecam_core::ServiceError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Decides whether `role` may pass a guard listing `allowed`.
///
/// Admin passes every guard. An empty list admits any authenticated role.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), ServiceError> {
    if role.is_admin() || allowed.is_empty() || allowed.contains(&role) {
        return Ok(());
    }

    let required = allowed
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ServiceError::forbidden(format!(
        "Access denied. Required roles: {}",
        required
    )))
}

/// Same as [`authorize`] for an already extracted caller.
pub fn check_role(auth_user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    authorize(auth_user.role(), allowed).map_err(AppError::from)
}

/// Middleware body shared by the guards below.
///
/// ```rust,ignore
/// use axum::{Router, middleware};
///
/// let routes = Router::new()
///     .route("/grades", get(grades_handler))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, &[Role::Teacher]),
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed: &'static [Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_role(&auth_user, allowed)?;

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Students, plus admin.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Teachers, plus admin.
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_bypasses_every_guard() {
        assert!(authorize(Role::Admin, &[Role::Student]).is_ok());
        assert!(authorize(Role::Admin, &[Role::Teacher]).is_ok());
        assert!(authorize(Role::Admin, &[Role::Student, Role::Teacher]).is_ok());
    }

    #[test]
    fn test_listed_role_passes() {
        assert!(authorize(Role::Student, &[Role::Student]).is_ok());
        assert!(authorize(Role::Teacher, &[Role::Student, Role::Teacher]).is_ok());
    }

    #[test]
    fn test_unlisted_role_is_forbidden() {
        let err = authorize(Role::Student, &[Role::Admin]).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = authorize(Role::Teacher, &[Role::Student]).unwrap_err();
        assert_eq!(err.to_string(), "Access denied. Required roles: student");
    }

    #[test]
    fn test_empty_list_admits_any_role() {
        for role in Role::ALL {
            assert!(authorize(role, &[]).is_ok());
        }
    }
}
