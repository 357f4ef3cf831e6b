use async_trait::async_trait;
use ecam_auth::Role;
use ecam_core::ServiceResult;
use ecam_models::{
    CreateTeacherDto, IdentityId, PersonCreate, PersonUpdate, Teacher, TeacherDto, TeacherId,
    UpdateTeacherDto,
};
use sqlx::SqliteConnection;

use crate::modules::roles::RoleEntity;
use crate::utils::db::{map_code_conflict, normalize_code};

const CODE_COLUMN: &str = "teachers.teacher_id";

#[derive(Debug, Default, Clone, Copy)]
pub struct TeacherRole;

#[async_trait]
impl RoleEntity for TeacherRole {
    type Id = TeacherId;
    type Record = Teacher;
    type Dto = TeacherDto;
    type Create = CreateTeacherDto;
    type Update = UpdateTeacherDto;

    const ROLE: Role = Role::Teacher;
    const TABLE: &'static str = "teachers";
    const LABEL: &'static str = "Teacher";
    const EXTRA_COLUMNS: &'static [&'static str] = &["teacher_id"];

    fn identity_create(dto: &CreateTeacherDto) -> PersonCreate {
        dto.person_create()
    }

    fn identity_update(dto: &UpdateTeacherDto) -> PersonUpdate {
        dto.person_update()
    }

    async fn create_for_identity(
        &self,
        conn: &mut SqliteConnection,
        identity_id: IdentityId,
        dto: &CreateTeacherDto,
    ) -> ServiceResult<TeacherId> {
        let code = normalize_code(dto.teacher_code.as_deref());

        sqlx::query_scalar(
            "INSERT INTO teachers (person_id, teacher_id) VALUES (?, ?) RETURNING id",
        )
        .bind(identity_id)
        .bind(&code)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            map_code_conflict(
                e,
                CODE_COLUMN,
                "teacherId",
                code.as_deref(),
                "Failed to insert teacher",
            )
        })
    }

    async fn apply_role_update(
        &self,
        conn: &mut SqliteConnection,
        id: TeacherId,
        dto: &UpdateTeacherDto,
    ) -> ServiceResult<()> {
        let Some(code) = normalize_code(dto.teacher_code.as_deref()) else {
            return Ok(());
        };

        sqlx::query("UPDATE teachers SET teacher_id = ? WHERE id = ?")
            .bind(&code)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                map_code_conflict(
                    e,
                    CODE_COLUMN,
                    "teacherId",
                    Some(&code),
                    "Failed to update teacher",
                )
            })?;

        Ok(())
    }
}
