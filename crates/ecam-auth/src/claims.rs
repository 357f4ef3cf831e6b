//! The payload signed into every access token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `id`: Identity (person) id the token was issued for
/// - `role`: Role resolved at login
/// - `iss` / `aud`: Issuer and audience, both checked on verification
/// - `exp`: Expiration timestamp
/// - `iat`: Issued-at timestamp
///
/// `id` has no default, so a token without it fails to decode and is
/// rejected like any other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Identity id
    pub id: i64,
    /// Role of the identity
    pub role: Role,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn identity_id(&self) -> i64 {
        self.id
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            id: 7,
            role: Role::Student,
            iss: "ecam".to_string(),
            aud: "ecam-audience".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_claims_wire_names() {
        let json = serde_json::to_value(sample_claims()).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["role"], "student");
        assert_eq!(json["iss"], "ecam");
        assert_eq!(json["aud"], "ecam-audience");
    }

    #[test]
    fn test_claims_without_id_do_not_deserialize() {
        let json = r#"{"role":"admin","iss":"ecam","aud":"ecam-audience","exp":9999999999,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_with_null_id_do_not_deserialize() {
        let json =
            r#"{"id":null,"role":"admin","iss":"ecam","aud":"ecam-audience","exp":9999999999,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_is_admin() {
        let mut claims = sample_claims();
        assert!(!claims.is_admin());

        claims.role = Role::Admin;
        assert!(claims.is_admin());
        assert_eq!(claims.identity_id(), 7);
    }
}
