//! Centralized error handling.
//!
//! Every failure inside the service layer is a [`WrapError`]: a numeric
//! [`ErrorCode`], a short message, and the root cause that produced it.
//! The first three digits of a code are the HTTP status the adapter returns
//! (`400027` is rendered as `400`).

use std::error::Error as StdError;
use std::fmt;

use axum::http::StatusCode;

/// Boxed root cause carried by a [`WrapError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias
pub type AppResult<T> = Result<T, WrapError>;

/// Numeric error codes shared with clients.
///
/// The values are part of the public contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // 400 family
    DecodeRequestBody,
    ValidateRequest,
    CreateUser,
    BlockUser,
    UnblockUser,
    GetUserDetails,
    LoginUser,
    InvalidCredentials,
    UserBlocked,
    GenerateToken,

    // 404 family
    UserNotFound,

    // 500 family
    InternalServer,
    ContextError,
}

impl ErrorCode {
    /// Every declared code, in numeric order.
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::DecodeRequestBody,
        ErrorCode::ValidateRequest,
        ErrorCode::CreateUser,
        ErrorCode::BlockUser,
        ErrorCode::UnblockUser,
        ErrorCode::GetUserDetails,
        ErrorCode::LoginUser,
        ErrorCode::InvalidCredentials,
        ErrorCode::UserBlocked,
        ErrorCode::GenerateToken,
        ErrorCode::UserNotFound,
        ErrorCode::InternalServer,
        ErrorCode::ContextError,
    ];

    /// Wire value of the code.
    pub const fn value(self) -> u32 {
        match self {
            ErrorCode::DecodeRequestBody => 400_001,
            ErrorCode::ValidateRequest => 400_002,
            ErrorCode::CreateUser => 400_004,
            ErrorCode::BlockUser => 400_009,
            ErrorCode::UnblockUser => 400_010,
            ErrorCode::GetUserDetails => 400_011,
            ErrorCode::LoginUser => 400_026,
            ErrorCode::InvalidCredentials => 400_027,
            ErrorCode::UserBlocked => 400_028,
            ErrorCode::GenerateToken => 400_029,
            ErrorCode::UserNotFound => 404_001,
            ErrorCode::InternalServer => 500_000,
            ErrorCode::ContextError => 500_003,
        }
    }

    /// HTTP status derived from the code's leading digits.
    pub fn status(self) -> StatusCode {
        status_from_code(self.value())
    }
}

/// Derive the HTTP status from a numeric error code.
///
/// Keeps the leading three decimal digits (`404001` becomes `404`). Codes
/// with fewer than three digits, or whose prefix is not a valid status in
/// `100..=599`, map to `500 Internal Server Error`.
pub fn status_from_code(code: u32) -> StatusCode {
    let digits = code.to_string();
    let prefix = match digits.get(..3) {
        Some(prefix) => prefix,
        None => return StatusCode::INTERNAL_SERVER_ERROR,
    };

    prefix
        .parse::<u16>()
        .ok()
        .filter(|status| (100..600).contains(status))
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Tagged application error.
///
/// Displays as the root cause when one is present, so logs show what
/// actually went wrong; [`WrapError::message`] keeps the short description.
#[derive(Debug)]
pub struct WrapError {
    code: ErrorCode,
    message: String,
    cause: Option<BoxError>,
}

impl WrapError {
    /// Create a tagged error. `cause` may be absent.
    pub fn new(code: ErrorCode, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self {
            code,
            message: message.into(),
            cause,
        }
    }

    /// Tag `cause` with `code`.
    pub fn wrap(code: ErrorCode, message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::new(code, message, Some(cause.into()))
    }

    /// Tagged error without an underlying cause.
    pub fn bare(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message, None)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic text: the root cause, or the message when there is none.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}", cause),
            None => f.write_str(&self.message),
        }
    }
}

impl StdError for WrapError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// HTTP-facing view of a [`WrapError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: u32,
    pub message: String,
    pub details: Vec<String>,
}

/// Convert an error into its HTTP-facing form.
///
/// Returns `None` when `err` is not a [`WrapError`]; the caller decides how
/// to report unknown failures. `message` replaces the error's own message so
/// internal wording never becomes the primary text shown to clients.
pub fn to_api_error(err: &(dyn StdError + 'static), message: &str) -> Option<ApiError> {
    let wrapped = err.downcast_ref::<WrapError>()?;

    Some(ApiError {
        status: wrapped.status(),
        code: wrapped.code.value(),
        message: message.to_string(),
        details: vec![wrapped.detail()],
    })
}
