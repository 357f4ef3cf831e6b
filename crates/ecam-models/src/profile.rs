//! Self-service field policy.
//!
//! When a caller edits their own record through `/me`, only the fields listed
//! for their role survive; everything else in the payload is dropped before
//! the update reaches the role service. The policy is an allow-list, so a
//! field added to an update DTO later is refused until it is listed here.

use ecam_auth::Role;

use crate::admins::UpdateAdminDto;
use crate::students::UpdateStudentDto;
use crate::teachers::UpdateTeacherDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Password,
    StudentCode,
    StudyYear,
    OptionCode,
    TeacherCode,
}

const ADMIN_SELF_FIELDS: &[ProfileField] = &[
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Password,
];

const STUDENT_SELF_FIELDS: &[ProfileField] = &[
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Email,
    ProfileField::Password,
];

const TEACHER_SELF_FIELDS: &[ProfileField] = &[ProfileField::Password];

/// Fields `role` may change on its own record.
pub fn self_service_fields(role: Role) -> &'static [ProfileField] {
    match role {
        Role::Admin => ADMIN_SELF_FIELDS,
        Role::Student => STUDENT_SELF_FIELDS,
        Role::Teacher => TEACHER_SELF_FIELDS,
    }
}

/// An update payload that can be cut down to an allow-list of fields.
pub trait SelfServiceUpdate: Sized {
    fn retain_fields(self, allowed: &[ProfileField]) -> Self;
}

/// Strips every field `role` may not change on its own record.
pub fn sanitize_self_update<T: SelfServiceUpdate>(role: Role, update: T) -> T {
    update.retain_fields(self_service_fields(role))
}

fn keep<T>(value: Option<T>, field: ProfileField, allowed: &[ProfileField]) -> Option<T> {
    if allowed.contains(&field) { value } else { None }
}

impl SelfServiceUpdate for UpdateAdminDto {
    fn retain_fields(self, allowed: &[ProfileField]) -> Self {
        Self {
            first_name: keep(self.first_name, ProfileField::FirstName, allowed),
            last_name: keep(self.last_name, ProfileField::LastName, allowed),
            email: keep(self.email, ProfileField::Email, allowed),
            password: keep(self.password, ProfileField::Password, allowed),
        }
    }
}

impl SelfServiceUpdate for UpdateStudentDto {
    fn retain_fields(self, allowed: &[ProfileField]) -> Self {
        Self {
            first_name: keep(self.first_name, ProfileField::FirstName, allowed),
            last_name: keep(self.last_name, ProfileField::LastName, allowed),
            email: keep(self.email, ProfileField::Email, allowed),
            password: keep(self.password, ProfileField::Password, allowed),
            matricule: keep(self.matricule, ProfileField::StudentCode, allowed),
            study_year: keep(self.study_year, ProfileField::StudyYear, allowed),
            option_code: keep(self.option_code, ProfileField::OptionCode, allowed),
        }
    }
}

impl SelfServiceUpdate for UpdateTeacherDto {
    fn retain_fields(self, allowed: &[ProfileField]) -> Self {
        Self {
            first_name: keep(self.first_name, ProfileField::FirstName, allowed),
            last_name: keep(self.last_name, ProfileField::LastName, allowed),
            email: keep(self.email, ProfileField::Email, allowed),
            password: keep(self.password, ProfileField::Password, allowed),
            teacher_code: keep(self.teacher_code, ProfileField::TeacherCode, allowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_student_update() -> UpdateStudentDto {
        UpdateStudentDto {
            first_name: Some("Alice".into()),
            last_name: Some("Martin".into()),
            email: Some("alice@school.com".into()),
            password: Some("newpass".into()),
            matricule: Some("X".into()),
            study_year: Some("MA2".into()),
            option_code: Some("ELEC".into()),
        }
    }

    #[test]
    fn test_student_keeps_identity_fields_only() {
        let clean = sanitize_self_update(Role::Student, full_student_update());

        assert_eq!(clean.first_name.as_deref(), Some("Alice"));
        assert_eq!(clean.last_name.as_deref(), Some("Martin"));
        assert_eq!(clean.email.as_deref(), Some("alice@school.com"));
        assert_eq!(clean.password.as_deref(), Some("newpass"));
        assert!(clean.matricule.is_none());
        assert!(clean.study_year.is_none());
        assert!(clean.option_code.is_none());
    }

    #[test]
    fn test_student_payload_with_code_and_password() {
        let update: UpdateStudentDto =
            serde_json::from_str(r#"{"studentId":"X","password":"y"}"#).unwrap();

        let clean = sanitize_self_update(Role::Student, update);
        assert_eq!(clean.password.as_deref(), Some("y"));
        assert!(clean.matricule.is_none());
    }

    #[test]
    fn test_teacher_keeps_password_only() {
        let update = UpdateTeacherDto {
            first_name: Some("Bob".into()),
            last_name: Some("Prof".into()),
            email: Some("other@ecam.be".into()),
            password: Some("newpass".into()),
            teacher_code: Some("T-2".into()),
        };

        let clean = sanitize_self_update(Role::Teacher, update);
        assert_eq!(clean.password.as_deref(), Some("newpass"));
        assert!(clean.first_name.is_none());
        assert!(clean.last_name.is_none());
        assert!(clean.email.is_none());
        assert!(clean.teacher_code.is_none());
    }

    #[test]
    fn test_admin_keeps_identity_fields() {
        let update = UpdateAdminDto {
            first_name: Some("Ada".into()),
            password: Some("newpass".into()),
            ..Default::default()
        };

        let clean = sanitize_self_update(Role::Admin, update);
        assert_eq!(clean.first_name.as_deref(), Some("Ada"));
        assert_eq!(clean.password.as_deref(), Some("newpass"));
    }

    #[test]
    fn test_empty_allow_list_strips_everything() {
        let clean = full_student_update().retain_fields(&[]);
        assert!(clean.person_update().is_empty());
        assert!(!clean.has_role_fields());
    }

    #[test]
    fn test_no_role_may_change_role_codes_on_itself() {
        for role in Role::ALL {
            let fields = self_service_fields(role);
            assert!(!fields.contains(&ProfileField::StudentCode));
            assert!(!fields.contains(&ProfileField::TeacherCode));
            assert!(!fields.contains(&ProfileField::StudyYear));
        }
    }
}
