//! Signing and verification of access tokens.
//!
//! A [`TokenIssuer`] is built once at startup from [`JwtConfig`] and shared
//! read-only afterwards. Tokens are HS256-signed and carry the [`Claims`]
//! payload.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use ecam_auth::{Role, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(&jwt_config);
//! let token = issuer.issue_access_token(identity_id, Role::Admin)?;
//! let claims = issuer.verify(&token)?;
//! ```

use std::fmt;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use ecam_config::JwtConfig;
use ecam_core::ServiceError;

use crate::claims::Claims;
use crate::role::Role;

/// Clock skew tolerated when checking `exp`, in seconds.
const LEEWAY_SECONDS: u64 = 5;

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    access_token_ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_ttl: Duration::seconds(config.access_token_expiry),
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Signs a token for `identity_id` acting as `role`, valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if encoding fails, which only happens
    /// with an unusable key.
    pub fn issue(&self, identity_id: i64, role: Role, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = (now + ttl).timestamp().max(0) as usize;

        let claims = Claims {
            id: identity_id,
            role,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Storage(anyhow!("Failed to create token: {}", e)))
    }

    /// Signs a token with the configured access token lifetime.
    pub fn issue_access_token(&self, identity_id: i64, role: Role) -> Result<String, ServiceError> {
        self.issue(identity_id, role, self.access_token_ttl)
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] when the signature is wrong, the
    /// issuer or audience does not match, the token has expired, or the
    /// payload lacks the identity id.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::unauthorized("Invalid or expired token"))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = LEEWAY_SECONDS;
        validation
    }
}
