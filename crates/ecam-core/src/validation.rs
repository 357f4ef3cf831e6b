//! Acceptance policy for identity credentials.
//!
//! Both checks trim their input first; the returned email is the trimmed form
//! that gets stored.

use validator::ValidateEmail;

use crate::errors::ServiceError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates an email address and returns its trimmed form.
///
/// On top of the RFC-style check from `validator`, the domain must end with
/// an alphabetic top-level label of at least two characters, so addresses such
/// as `admin@localhost` are refused.
pub fn require_valid_email(email: &str) -> Result<String, ServiceError> {
    let trimmed = email.trim();

    if !is_valid_email(trimmed) {
        return Err(ServiceError::validation(format!(
            "Invalid email format: '{}'",
            trimmed
        )));
    }

    Ok(trimmed.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Enforces the minimum password length on the trimmed password.
pub fn require_valid_password(password: &str) -> Result<(), ServiceError> {
    if password.trim().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
