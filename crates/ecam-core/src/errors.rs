//! Typed errors raised by the identity, role and dispatch services.
//!
//! Services never build HTTP responses. The web layer maps each variant to a
//! status code, see `AppError` in the root crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input the caller can fix (bad email, short password, bad id).
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DuplicateEmail(String),

    /// Unknown id or unknown CRUD table.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Unexpected persistence failure, carrying the storage driver's error.
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T, E = ServiceError> = std::result::Result<T, E>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate_email(email: &str) -> Self {
        Self::DuplicateEmail(format!("Email '{}' is already registered", email))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Short machine-readable name of the variant, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::Storage(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_duplicate_email_message_names_the_email() {
        let err = ServiceError::duplicate_email("alice@school.com");
        assert_eq!(
            err.to_string(),
            "Email 'alice@school.com' is already registered"
        );
        assert_eq!(err.kind(), "duplicate_email");
    }

    #[test]
    fn test_storage_from_anyhow_keeps_context() {
        let err: ServiceError = anyhow!("disk I/O error")
            .context("Failed to insert person")
            .into();

        assert!(matches!(err, ServiceError::Storage(_)));
        let message = err.to_string();
        assert!(message.contains("Failed to insert person"));
        assert!(message.contains("disk I/O error"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ServiceError::validation("x").kind(), "validation");
        assert_eq!(ServiceError::not_found("x").kind(), "not_found");
        assert_eq!(ServiceError::unauthorized("x").kind(), "unauthorized");
        assert_eq!(ServiceError::forbidden("x").kind(), "forbidden");
    }
}
