//! Admin models and DTOs.
//!
//! An admin carries no fields beyond its identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AdminId, IdentityId};
use crate::persons::{PersonCreate, PersonUpdate};

/// An `admins` row joined with its identity.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: AdminId,
    pub person_id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: AdminId,
    pub person_id: IdentityId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminDto {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            person_id: admin.person_id,
            first_name: admin.first_name,
            last_name: admin.last_name,
            email: admin.email,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    #[schema(example = "admin@ecam.be")]
    pub email: String,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: String,
}

impl CreateAdminDto {
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
pub struct UpdateAdminDto {
    #[validate(length(max = 120, message = "firstName must be at most 120 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 120, message = "lastName must be at most 120 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "password must be at most 255 characters"))]
    pub password: Option<String>,
}

impl UpdateAdminDto {
    pub fn person_update(&self) -> PersonUpdate {
        PersonUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
