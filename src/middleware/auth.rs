use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use ecam_auth::{Claims, Role};
use ecam_models::IdentityId;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that verifies the bearer token and yields its claims.
///
/// When a role guard already ran for this request the claims it resolved are
/// reused from the request extensions instead of verifying the token again.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller's identity, taken from the verified token only.
    pub fn identity_id(&self) -> IdentityId {
        IdentityId::new(self.0.identity_id())
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Missing or malformed authorization header"))?;

        let claims = state.tokens.verify(bearer.token())?;

        Ok(AuthUser(claims))
    }
}
