use std::sync::Arc;

use anyhow::Context;
use ecam_auth::TokenIssuer;
use ecam_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use ecam_core::{BcryptHasher, PasswordHasher};
use ecam_db::{SqlitePool, init_db_pool, run_migrations};

use crate::modules::admins::AdminRole;
use crate::modules::crud::{CrudRegistry, RoleCrudHandler};
use crate::modules::identity::IdentityStore;
use crate::modules::roles::{RoleEntity, RoleService};
use crate::modules::students::StudentRole;
use crate::modules::teachers::TeacherRole;

/// Process-wide state. Everything in it is built at startup and only read
/// afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenIssuer,
    pub identities: IdentityStore,
    pub crud: Arc<CrudRegistry>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        jwt_config: &JwtConfig,
        hasher: Arc<dyn PasswordHasher>,
        cors_config: CorsConfig,
    ) -> Self {
        let identities = IdentityStore::new(hasher);

        let crud = CrudRegistry::new()
            .with_handler(Arc::new(RoleCrudHandler::new(
                db.clone(),
                RoleService::new(AdminRole, identities.clone()),
            )))
            .with_handler(Arc::new(RoleCrudHandler::new(
                db.clone(),
                RoleService::new(StudentRole, identities.clone()),
            )))
            .with_handler(Arc::new(RoleCrudHandler::new(
                db.clone(),
                RoleService::new(TeacherRole, identities.clone()),
            )));

        Self {
            db,
            tokens: TokenIssuer::new(jwt_config),
            identities,
            crud: Arc::new(crud),
            cors_config,
        }
    }

    pub fn role_service<R: RoleEntity>(&self) -> RoleService<R> {
        RoleService::new(R::default(), self.identities.clone())
    }
}

/// Opens the database, applies migrations and builds the state from the
/// environment.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to open database")?;
    run_migrations(&db)
        .await
        .context("Failed to run migrations")?;

    let server_config = ServerConfig::from_env();

    Ok(AppState::new(
        db,
        &JwtConfig::from_env(),
        Arc::new(BcryptHasher::new(server_config.bcrypt_cost)),
        CorsConfig::from_env(),
    ))
}
