use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use ecam_core::ServiceError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

pub(crate) fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// Deserializes an already-parsed JSON body into `T` and validates it.
///
/// Used where the body arrives as a raw [`serde_json::Value`], such as the
/// table-keyed CRUD endpoints.
pub fn validate_value<T>(body: serde_json::Value) -> Result<T, ServiceError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_value(body).map_err(|e| {
        let message = e.to_string();
        match message
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
        {
            Some(field) => ServiceError::validation(format!("{} is required", field)),
            None => ServiceError::validation("Invalid request body"),
        }
    })?;

    value
        .validate()
        .map_err(|errors| ServiceError::validation(format_errors(&errors)))?;

    Ok(value)
}

/// JSON body that is deserialized and then validated before the handler runs.
/// Both failures are reported as 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body with readable rejection messages but no validation.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 1, max = 10, message = "level must be 1-10"))]
        level: i32,
    }

    #[test]
    fn test_validate_value_ok() {
        let sample: Sample = validate_value(json!({"name": "x", "level": 3})).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.level, 3);
    }

    #[test]
    fn test_validate_value_missing_field() {
        let err = validate_value::<Sample>(json!({"level": 3})).unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validate_value_rule_failures_are_joined() {
        let err = validate_value::<Sample>(json!({"name": "", "level": 99})).unwrap_err();
        assert_eq!(err.to_string(), "level must be 1-10, name is required");
    }

    #[test]
    fn test_validate_value_wrong_type() {
        let err = validate_value::<Sample>(json!({"name": 5, "level": 1})).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
