//! Administrative operations behind `ecam-cli`.

use std::sync::Arc;

use ecam_core::{PasswordHasher, ServiceResult};
use ecam_models::{AdminDto, CreateAdminDto};
use sqlx::SqlitePool;
use tracing::info;

use crate::modules::admins::AdminRole;
use crate::modules::identity::IdentityStore;
use crate::modules::roles::RoleService;

fn non_blank(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Creates an admin identity. This is how the first admin comes to exist.
pub async fn create_admin(
    db: &SqlitePool,
    hasher: Arc<dyn PasswordHasher>,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> ServiceResult<AdminDto> {
    let service = RoleService::new(AdminRole, IdentityStore::new(hasher));
    let dto = CreateAdminDto {
        first_name: non_blank(first_name),
        last_name: non_blank(last_name),
        email,
        password,
    };

    let admin = service.create_from_dto(db, &dto).await?;
    info!(admin_id = %admin.id, email = %admin.email, "Admin created from CLI");
    Ok(admin)
}

/// Deletes the identity registered under `email` together with every role
/// row it holds. Returns `false` when no identity has that email.
pub async fn delete_person(db: &SqlitePool, email: &str) -> ServiceResult<bool> {
    let Some(person) = IdentityStore::find_by_email(db, email).await? else {
        return Ok(false);
    };

    let deleted = IdentityStore::delete(db, person.id).await?;
    info!(identity_id = %person.id, "Person deleted from CLI");
    Ok(deleted)
}
