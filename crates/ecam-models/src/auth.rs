//! Login request and response shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use ecam_auth::Role;

use crate::ids::IdentityId;

#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "alice@school.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "pass123")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// The caller as seen through their verified token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: IdentityId,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_wire_names() {
        let json = serde_json::to_value(LoginResponse::bearer("abc".to_string())).unwrap();
        assert_eq!(json["accessToken"], "abc");
        assert_eq!(json["tokenType"], "Bearer");
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"","password":"x"}"#).unwrap();
        assert!(req.validate().is_err());
        assert!(!format!("{:?}", req).contains("\"x\""));
    }

    #[test]
    fn test_me_response() {
        let json = serde_json::to_value(MeResponse {
            id: IdentityId::new(3),
            role: Role::Teacher,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "role": "teacher"}));
    }
}
