use anyhow::Context;
use async_trait::async_trait;
use ecam_auth::Role;
use ecam_core::ServiceResult;
use ecam_models::{
    Admin, AdminDto, AdminId, CreateAdminDto, IdentityId, PersonCreate, PersonUpdate,
    UpdateAdminDto,
};
use sqlx::SqliteConnection;

use crate::modules::roles::RoleEntity;

#[derive(Debug, Default, Clone, Copy)]
pub struct AdminRole;

#[async_trait]
impl RoleEntity for AdminRole {
    type Id = AdminId;
    type Record = Admin;
    type Dto = AdminDto;
    type Create = CreateAdminDto;
    type Update = UpdateAdminDto;

    const ROLE: Role = Role::Admin;
    const TABLE: &'static str = "admins";
    const LABEL: &'static str = "Admin";
    const EXTRA_COLUMNS: &'static [&'static str] = &[];

    fn identity_create(dto: &CreateAdminDto) -> PersonCreate {
        dto.person_create()
    }

    fn identity_update(dto: &UpdateAdminDto) -> PersonUpdate {
        dto.person_update()
    }

    async fn create_for_identity(
        &self,
        conn: &mut SqliteConnection,
        identity_id: IdentityId,
        _dto: &CreateAdminDto,
    ) -> ServiceResult<AdminId> {
        let id: AdminId =
            sqlx::query_scalar("INSERT INTO admins (person_id) VALUES (?) RETURNING id")
                .bind(identity_id)
                .fetch_one(&mut *conn)
                .await
                .context("Failed to insert admin")?;
        Ok(id)
    }
}
