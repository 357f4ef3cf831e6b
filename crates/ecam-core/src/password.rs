//! Password hashing behind a swappable trait.
//!
//! The identity store only ever sees a `dyn PasswordHasher`, so the hashing
//! strategy is chosen at startup. [`BcryptHasher`] is the shipped one.

use std::fmt::Debug;

use anyhow::anyhow;

use crate::errors::ServiceError;

pub trait PasswordHasher: Debug + Send + Sync {
    /// Produces the secret stored in place of the plain password.
    fn hash(&self, plain: &str) -> Result<String, ServiceError>;

    /// Checks a plain password against a stored secret.
    fn verify(&self, plain: &str, secret: &str) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, ServiceError> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| ServiceError::Storage(anyhow!("Failed to hash password: {}", e)))
    }

    fn verify(&self, plain: &str, secret: &str) -> Result<bool, ServiceError> {
        // A secret that is not a bcrypt hash can never match.
        match bcrypt::verify(plain, secret) {
            Ok(matches) => Ok(matches),
            Err(bcrypt::BcryptError::InvalidHash(_)) | Err(bcrypt::BcryptError::InvalidPrefix(_)) => {
                Ok(false)
            }
            Err(e) => Err(ServiceError::Storage(anyhow!(
                "Failed to verify password: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn test_hash_is_not_plain_text() {
        let hasher = fast_hasher();
        let secret = hasher.hash("pass123").unwrap();

        assert_ne!(secret, "pass123");
        assert!(secret.starts_with("$2"));
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let hasher = fast_hasher();
        let secret = hasher.hash("pass123").unwrap();

        assert!(hasher.verify("pass123", &secret).unwrap());
        assert!(!hasher.verify("pass124", &secret).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_secret() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("pass123", "not-a-hash").unwrap());
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(BcryptHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}
