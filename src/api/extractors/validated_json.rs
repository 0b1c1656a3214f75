//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{ErrorCode, WrapError};

/// JSON body that has been decoded and validated.
///
/// Rejects with `400001` when the body cannot be decoded and `400002` when
/// validation fails. Take it as `Result<ValidatedJson<T>, WrapError>` to
/// render the rejection under the endpoint's own message.
///
/// ```rust,ignore
/// async fn login(
///     State(state): State<AppState>,
///     payload: Result<ValidatedJson<LoginRequest>, WrapError>,
/// ) -> Response {
///     // ...
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
    type Rejection = WrapError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            WrapError::wrap(ErrorCode::DecodeRequestBody, "error while parsing", e.body_text())
        })?;

        value.validate().map_err(|e| {
            WrapError::wrap(
                ErrorCode::ValidateRequest,
                "error while validating",
                format_validation_errors(&e),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string, ordered by field
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
