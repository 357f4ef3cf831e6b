//! Student models and DTOs.
//!
//! The school-issued student code is called `matricule` in Rust and
//! `studentId` on the wire, which is the name clients already send.
//! `matricule` is accepted as an alias on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{IdentityId, StudentId};
use crate::persons::{PersonCreate, PersonUpdate};

/// A `students` row joined with its identity.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: StudentId,
    pub person_id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "student_id")]
    pub matricule: Option<String>,
    pub study_year: Option<String>,
    pub option_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: StudentId,
    pub person_id: IdentityId,
    #[serde(rename = "studentId")]
    pub matricule: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Free-form year code, e.g. "BA1"
    pub study_year: Option<String>,
    pub option_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            person_id: student.person_id,
            matricule: student.matricule,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            study_year: student.study_year,
            option_code: student.option_code,
            created_at: student.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    #[schema(example = "alice@school.com")]
    pub email: String,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: String,
    #[serde(rename = "studentId", alias = "matricule")]
    #[validate(length(max = 20, message = "studentId must be at most 20 characters"))]
    #[schema(example = "12345")]
    pub matricule: Option<String>,
    #[validate(length(max = 64, message = "studyYear must be at most 64 characters"))]
    #[schema(example = "BA1")]
    pub study_year: Option<String>,
    #[validate(length(max = 64, message = "optionCode must be at most 64 characters"))]
    pub option_code: Option<String>,
}

impl CreateStudentDto {
    pub fn person_create(&self) -> PersonCreate {
        PersonCreate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Partial update of a student. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: Option<String>,
    #[serde(rename = "studentId", alias = "matricule")]
    #[validate(length(max = 20, message = "studentId must be at most 20 characters"))]
    pub matricule: Option<String>,
    #[validate(length(max = 64, message = "studyYear must be at most 64 characters"))]
    pub study_year: Option<String>,
    #[validate(length(max = 64, message = "optionCode must be at most 64 characters"))]
    pub option_code: Option<String>,
}

impl UpdateStudentDto {
    pub fn person_update(&self) -> PersonUpdate {
        PersonUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn has_role_fields(&self) -> bool {
        self.matricule.is_some() || self.study_year.is_some() || self.option_code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_wire_names() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{
                "firstName": "Alice",
                "email": "alice@school.com",
                "password": "pass123",
                "studentId": "12345",
                "studyYear": "BA1",
                "optionCode": "INFO"
            }"#,
        )
        .unwrap();

        assert_eq!(dto.matricule.as_deref(), Some("12345"));
        assert_eq!(dto.study_year.as_deref(), Some("BA1"));
        assert_eq!(dto.option_code.as_deref(), Some("INFO"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_accepts_matricule_alias() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"email":"alice@school.com","password":"pass123","matricule":"12345"}"#,
        )
        .unwrap();
        assert_eq!(dto.matricule.as_deref(), Some("12345"));
    }

    #[test]
    fn test_create_student_dto_matricule_too_long() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"email":"alice@school.com","password":"pass123","studentId":"123456789012345678901"}"#,
        )
        .unwrap();

        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_update_student_dto_role_fields() {
        let dto: UpdateStudentDto = serde_json::from_str(r#"{"password":"y"}"#).unwrap();
        assert!(!dto.has_role_fields());
        assert_eq!(dto.person_update().password.as_deref(), Some("y"));

        let dto: UpdateStudentDto = serde_json::from_str(r#"{"studyYear":"BA2"}"#).unwrap();
        assert!(dto.has_role_fields());
        assert!(dto.person_update().is_empty());
    }

    #[test]
    fn test_student_dto_serializes_matricule_as_student_id() {
        let dto = StudentDto {
            id: StudentId::new(3),
            person_id: IdentityId::new(8),
            matricule: Some("12345".to_string()),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            email: "alice@school.com".to_string(),
            study_year: Some("BA1".to_string()),
            option_code: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["studentId"], "12345");
        assert_eq!(json["studyYear"], "BA1");
        assert!(json.get("matricule").is_none());
        assert!(json.get("password").is_none());
    }
}
