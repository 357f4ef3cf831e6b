//! The shared identity record.
//!
//! A [`Person`] is never returned to clients directly; role DTOs project the
//! public fields and the password secret stays inside the identity store.

use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::ids::IdentityId;

#[derive(Clone, FromRow)]
pub struct Person {
    pub id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_secret: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Person")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_secret", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for creating an identity. Names default to empty strings.
#[derive(Clone, Default)]
pub struct PersonCreate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for PersonCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonCreate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Changes to the shared identity fields. `None` leaves a field untouched.
#[derive(Clone, Default)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl PersonUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

impl fmt::Debug for PersonUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonUpdate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_debug_hides_secret() {
        let person = Person {
            id: IdentityId::new(1),
            first_name: "Alice".to_string(),
            last_name: "Martin".to_string(),
            email: "alice@school.com".to_string(),
            password_secret: "$2b$04$secret".to_string(),
            created_at: Utc::now(),
        };

        let debug = format!("{:?}", person);
        assert!(!debug.contains("$2b$04$secret"));
        assert!(debug.contains("alice@school.com"));
    }

    #[test]
    fn test_person_create_debug_hides_password() {
        let create = PersonCreate {
            email: "alice@school.com".to_string(),
            password: "pass123".to_string(),
            ..Default::default()
        };

        assert!(!format!("{:?}", create).contains("pass123"));
    }

    #[test]
    fn test_person_update_is_empty() {
        assert!(PersonUpdate::default().is_empty());

        let update = PersonUpdate {
            password: Some("newpass".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(!format!("{:?}", update).contains("newpass"));
    }
}
