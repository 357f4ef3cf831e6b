use anyhow::Context;
use ecam_auth::{Role, TokenIssuer};
use ecam_core::{ServiceError, ServiceResult};
use ecam_models::{IdentityId, LoginRequest, LoginResponse};
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::metrics::track_login;
use crate::modules::admins::AdminRole;
use crate::modules::identity::IdentityStore;
use crate::modules::roles::RoleEntity;
use crate::modules::students::StudentRole;
use crate::modules::teachers::TeacherRole;

/// Role tables in the order they are consulted at login.
const ROLE_RESOLUTION_ORDER: [(Role, &str); 3] = [
    (AdminRole::ROLE, AdminRole::TABLE),
    (StudentRole::ROLE, StudentRole::TABLE),
    (TeacherRole::ROLE, TeacherRole::TABLE),
];

pub struct AuthService;

impl AuthService {
    /// The first role row found for `identity_id`.
    pub async fn resolve_role(
        db: &SqlitePool,
        identity_id: IdentityId,
    ) -> ServiceResult<Option<Role>> {
        for (role, table) in ROLE_RESOLUTION_ORDER {
            let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE person_id = ?)");
            let found: bool = sqlx::query_scalar(&sql)
                .bind(identity_id)
                .fetch_one(db)
                .await
                .with_context(|| format!("Failed to check {table} for identity"))?;
            if found {
                return Ok(Some(role));
            }
        }
        Ok(None)
    }

    #[instrument(skip(db, identities, tokens, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &SqlitePool,
        identities: &IdentityStore,
        tokens: &TokenIssuer,
        dto: LoginRequest,
    ) -> ServiceResult<LoginResponse> {
        let person = match identities
            .verify_credentials(db, &dto.email, &dto.password)
            .await
        {
            Ok(person) => person,
            Err(err) => {
                track_login(None, false);
                return Err(err);
            }
        };

        let Some(role) = Self::resolve_role(db, person.id).await? else {
            warn!(identity_id = %person.id, "Login refused: identity holds no role");
            track_login(None, false);
            return Err(ServiceError::unauthorized("Invalid email or password"));
        };

        let access_token = tokens.issue_access_token(person.id.get(), role)?;

        track_login(Some(role), true);
        info!(identity_id = %person.id, role = %role, "User logged in");

        Ok(LoginResponse::bearer(access_token))
    }
}
