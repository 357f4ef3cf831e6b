use async_trait::async_trait;
use ecam_auth::Role;
use ecam_core::ServiceResult;
use ecam_models::{
    CreateStudentDto, IdentityId, PersonCreate, PersonUpdate, Student, StudentDto, StudentId,
    UpdateStudentDto,
};
use sqlx::SqliteConnection;

use crate::modules::roles::RoleEntity;
use crate::utils::db::{map_code_conflict, normalize_code};

const CODE_COLUMN: &str = "students.student_id";

#[derive(Debug, Default, Clone, Copy)]
pub struct StudentRole;

#[async_trait]
impl RoleEntity for StudentRole {
    type Id = StudentId;
    type Record = Student;
    type Dto = StudentDto;
    type Create = CreateStudentDto;
    type Update = UpdateStudentDto;

    const ROLE: Role = Role::Student;
    const TABLE: &'static str = "students";
    const LABEL: &'static str = "Student";
    const EXTRA_COLUMNS: &'static [&'static str] = &["student_id", "study_year", "option_code"];

    fn identity_create(dto: &CreateStudentDto) -> PersonCreate {
        dto.person_create()
    }

    fn identity_update(dto: &UpdateStudentDto) -> PersonUpdate {
        dto.person_update()
    }

    async fn create_for_identity(
        &self,
        conn: &mut SqliteConnection,
        identity_id: IdentityId,
        dto: &CreateStudentDto,
    ) -> ServiceResult<StudentId> {
        let matricule = normalize_code(dto.matricule.as_deref());

        sqlx::query_scalar(
            "INSERT INTO students (person_id, student_id, study_year, option_code) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(identity_id)
        .bind(&matricule)
        .bind(normalize_code(dto.study_year.as_deref()))
        .bind(normalize_code(dto.option_code.as_deref()))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            map_code_conflict(
                e,
                CODE_COLUMN,
                "studentId",
                matricule.as_deref(),
                "Failed to insert student",
            )
        })
    }

    async fn apply_role_update(
        &self,
        conn: &mut SqliteConnection,
        id: StudentId,
        dto: &UpdateStudentDto,
    ) -> ServiceResult<()> {
        if !dto.has_role_fields() {
            return Ok(());
        }

        let matricule = normalize_code(dto.matricule.as_deref());

        sqlx::query(
            "UPDATE students SET \
               student_id = COALESCE(?, student_id), \
               study_year = COALESCE(?, study_year), \
               option_code = COALESCE(?, option_code) \
             WHERE id = ?",
        )
        .bind(&matricule)
        .bind(normalize_code(dto.study_year.as_deref()))
        .bind(normalize_code(dto.option_code.as_deref()))
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            map_code_conflict(
                e,
                CODE_COLUMN,
                "studentId",
                matricule.as_deref(),
                "Failed to update student",
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecam_core::{BcryptHasher, ServiceError};
    use sqlx::SqlitePool;

    use super::*;
    use crate::modules::identity::IdentityStore;
    use crate::modules::roles::RoleService;

    fn service() -> RoleService<StudentRole> {
        RoleService::new(
            StudentRole,
            IdentityStore::new(Arc::new(BcryptHasher::new(4))),
        )
    }

    fn alice() -> CreateStudentDto {
        CreateStudentDto {
            first_name: Some("Alice".to_string()),
            last_name: Some("Martin".to_string()),
            email: "alice@school.com".to_string(),
            password: "pass123".to_string(),
            matricule: Some("12345".to_string()),
            study_year: Some("BA1".to_string()),
            option_code: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list_student(pool: SqlitePool) {
        let service = service();
        let created = service.create_from_dto(&pool, &alice()).await.unwrap();

        assert_eq!(created.email, "alice@school.com");
        assert_eq!(created.matricule.as_deref(), Some("12345"));
        assert_eq!(created.study_year.as_deref(), Some("BA1"));

        let all = service.get_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "alice@school.com");
        assert_eq!(service.count(&pool).await.unwrap(), 1);
        assert!(service.exists_by_email(&pool, "alice@school.com").await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_email_creates_nothing(pool: SqlitePool) {
        let service = service();
        service.create_from_dto(&pool, &alice()).await.unwrap();

        let mut again = alice();
        again.matricule = Some("99999".to_string());
        let err = service.create_from_dto(&pool, &again).await.unwrap_err();

        assert!(matches!(err, ServiceError::DuplicateEmail(_)));
        assert_eq!(service.count(&pool).await.unwrap(), 1);
        assert_eq!(IdentityStore::count(&pool).await.unwrap(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_matricule_rolls_back_identity(pool: SqlitePool) {
        let service = service();
        service.create_from_dto(&pool, &alice()).await.unwrap();

        let mut bob = alice();
        bob.email = "bob@school.com".to_string();
        let err = service.create_from_dto(&pool, &bob).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(!service.exists_by_email(&pool, "bob@school.com").await.unwrap());
        assert_eq!(IdentityStore::count(&pool).await.unwrap(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_identity_cascades(pool: SqlitePool) {
        let service = service();
        let created = service.create_from_dto(&pool, &alice()).await.unwrap();

        assert!(IdentityStore::delete(&pool, created.person_id).await.unwrap());

        assert!(service.get_by_id(&pool, created.id).await.unwrap().is_none());
        assert_eq!(service.count(&pool).await.unwrap(), 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deleting_student_keeps_identity(pool: SqlitePool) {
        let service = service();
        let created = service.create_from_dto(&pool, &alice()).await.unwrap();

        assert!(service.delete(&pool, created.id).await.unwrap());
        assert!(!service.delete(&pool, created.id).await.unwrap());

        assert!(service.get_by_id(&pool, created.id).await.unwrap().is_none());
        assert!(IdentityStore::find_by_id(&pool, created.person_id)
            .await
            .unwrap()
            .is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_applies_present_fields_only(pool: SqlitePool) {
        let service = service();
        let created = service.create_from_dto(&pool, &alice()).await.unwrap();

        let update = UpdateStudentDto {
            study_year: Some("BA2".to_string()),
            first_name: Some("Alicia".to_string()),
            ..Default::default()
        };
        let updated = service.update(&pool, created.id, &update).await.unwrap();

        assert_eq!(updated.first_name, "Alicia");
        assert_eq!(updated.last_name, "Martin");
        assert_eq!(updated.study_year.as_deref(), Some("BA2"));
        assert_eq!(updated.matricule.as_deref(), Some("12345"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_unknown_student(pool: SqlitePool) {
        let err = service()
            .update(&pool, StudentId::new(77), &UpdateStudentDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_search_and_get_by_identity(pool: SqlitePool) {
        let service = service();
        let created = service.create_from_dto(&pool, &alice()).await.unwrap();

        let mut bob = alice();
        bob.email = "bob@school.com".to_string();
        bob.first_name = Some("Bob".to_string());
        bob.matricule = None;
        service.create_from_dto(&pool, &bob).await.unwrap();

        let hits = service.search(&pool, "ALI").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, created.id);

        assert!(service.search(&pool, "%").await.unwrap().is_empty());

        let mine = service
            .get_by_identity(&pool, created.person_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mine.id, created.id);
    }
}
