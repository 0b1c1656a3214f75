use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{MSG_INTERNAL_ERROR, STATUS_FAIL, STATUS_OK};
use crate::errors::{to_api_error, ApiError, ErrorCode, WrapError};

/// Error body of a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = 400027)]
    pub code: u32,
    #[schema(example = "failed to login user")]
    pub message: String,
    pub details: Vec<String>,
}

/// Standard API response envelope.
///
/// Successes carry `result`, failures carry `error`; never both.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            result: Some(result),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn fail(code: u32, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            status: STATUS_FAIL.to_string(),
            result: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
                details,
            }),
        }
    }
}

/// 200 response wrapping `result` in the envelope
pub struct Success<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(ApiResponse::ok(self.0))).into_response()
    }
}

/// Failure envelope with an explicit HTTP status
pub struct Failure {
    pub status: StatusCode,
    pub body: ApiResponse<()>,
}

impl Failure {
    /// Failure whose `code` is the bare HTTP status, used by middleware.
    pub fn plain(status: StatusCode, message: &str, details: Vec<String>) -> Self {
        Self {
            status,
            body: ApiResponse::fail(u32::from(status.as_u16()), message, details),
        }
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status,
            body: ApiResponse::fail(err.code, err.message, err.details),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Render any error under the endpoint's `message`.
///
/// Tagged errors keep their code and root cause. Anything else becomes a
/// 500 with the endpoint message as its only detail.
pub fn error_response(err: &(dyn StdError + 'static), message: &str) -> Response {
    match to_api_error(err, message) {
        Some(api) => {
            if api.status.is_server_error() {
                tracing::error!("{} ({}): {}", message, api.code, err);
            } else {
                tracing::debug!("{} ({}): {}", message, api.code, err);
            }
            Failure::from(api).into_response()
        }
        None => {
            tracing::error!("Unrecognized error reached the HTTP layer: {}", err);
            Failure::from(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: ErrorCode::InternalServer.value(),
                message: MSG_INTERNAL_ERROR.to_string(),
                details: vec![message.to_string()],
            })
            .into_response()
        }
    }
}

/// Renders under the generic internal message; handlers that want their own
/// endpoint message go through [`respond`] instead.
impl IntoResponse for WrapError {
    fn into_response(self) -> Response {
        error_response(&self, MSG_INTERNAL_ERROR)
    }
}

/// Render a handler result as the success or failure envelope.
pub fn respond<T, E>(result: Result<T, E>, message: &str) -> Response
where
    T: Serialize,
    E: StdError + 'static,
{
    match result {
        Ok(value) => Success(value).into_response(),
        Err(err) => error_response(&err, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(serde_json::json!({"userid": 1}))).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok", "result": {"userid": 1}}));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::fail(
            400027,
            "failed to login user",
            vec!["invalid password for user johndoe".to_string()],
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "notok",
                "error": {
                    "code": 400027,
                    "message": "failed to login user",
                    "details": ["invalid password for user johndoe"]
                }
            })
        );
    }

    #[test]
    fn test_respond_uses_code_status() {
        let result: Result<(), WrapError> =
            Err(WrapError::bare(ErrorCode::UserNotFound, "user not found"));
        assert_eq!(respond(result, "failed to login user").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_respond_foreign_error_is_internal() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "socket closed",
        ));
        assert_eq!(
            respond(result, "failed to login user").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_wrap_error_renders_failure_envelope() {
        let response = WrapError::wrap(
            ErrorCode::DecodeRequestBody,
            "error while parsing",
            "EOF while parsing an object",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "status": "notok",
                "error": {
                    "code": 400001,
                    "message": "internal server error",
                    "details": ["EOF while parsing an object"]
                }
            })
        );
    }
}
