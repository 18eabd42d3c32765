//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use quality_registry::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct RenameRequest {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn rename(ValidatedJson(payload): ValidatedJson<RenameRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string.
///
/// Nested structs and lists are walked so errors on participants, details
/// or risk components surface too.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.join(", ")
}

fn collect_messages(errors: &validator::ValidationErrors, messages: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                messages.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, messages),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, messages);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewParticipant, NewSoftware};

    #[test]
    fn test_nested_messages_are_reported() {
        let request = NewSoftware {
            name: "Inventory App".to_string(),
            city: "Pasto".to_string(),
            general_objective: "x".to_string(),
            description: "y".to_string(),
            version: "1.0".to_string(),
            participants: vec![NewParticipant {
                name: String::new(),
                role: "Dev".to_string(),
            }],
        };

        let errors = request.validate().unwrap_err();
        let message = format_validation_errors(&errors);
        assert!(message.contains("participante"));
    }
}
