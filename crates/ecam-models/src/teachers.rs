//! Teacher models and DTOs.
//!
//! The external teacher code is `teacher_code` in Rust and `teacherId` on
//! the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{IdentityId, TeacherId};
use crate::persons::{PersonCreate, PersonUpdate};

/// A `teachers` row joined with its identity.
#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub id: TeacherId,
    pub person_id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "teacher_id")]
    pub teacher_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: TeacherId,
    pub person_id: IdentityId,
    #[serde(rename = "teacherId")]
    pub teacher_code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherDto {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            person_id: teacher.person_id,
            teacher_code: teacher.teacher_code,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            email: teacher.email,
            created_at: teacher.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    #[schema(example = "bob@ecam.be")]
    pub email: String,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: String,
    #[serde(rename = "teacherId")]
    #[validate(length(max = 20, message = "teacherId must be at most 20 characters"))]
    pub teacher_code: Option<String>,
}

impl CreateTeacherDto {
    pub fn person_create(&self) -> PersonCreate {
        PersonCreate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: Option<String>,
    #[serde(rename = "teacherId")]
    #[validate(length(max = 20, message = "teacherId must be at most 20 characters"))]
    pub teacher_code: Option<String>,
}

impl UpdateTeacherDto {
    pub fn person_update(&self) -> PersonUpdate {
        PersonUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_dto_wire_names() {
        let dto = TeacherDto {
            id: TeacherId::new(2),
            person_id: IdentityId::new(4),
            teacher_code: Some("T-001".to_string()),
            first_name: "Bob".to_string(),
            last_name: "Prof".to_string(),
            email: "bob@ecam.be".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["teacherId"], "T-001");
        assert_eq!(json["firstName"], "Bob");
        assert!(json.get("teacherCode").is_none());
    }

    #[test]
    fn test_update_teacher_dto_parses_teacher_id() {
        let dto: UpdateTeacherDto =
            serde_json::from_str(r#"{"teacherId":"T-9","password":"newpass"}"#).unwrap();
        assert_eq!(dto.teacher_code.as_deref(), Some("T-9"));
        assert_eq!(dto.person_update().password.as_deref(), Some("newpass"));
    }
}
