//! Authentication handlers.

use axum::{extract::State, response::Response, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MSG_LOGIN_FAILED, MSG_SIGNUP_FAILED};
use crate::errors::WrapError;
use crate::services::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::types::{respond, ErrorBody};

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = SignupResponse),
        (status = 400, description = "Invalid body or duplicate username", body = ErrorBody)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<SignupRequest>, WrapError>,
) -> Response {
    let result = match payload {
        Ok(ValidatedJson(request)) => state.auth_service.signup(request).await,
        Err(e) => Err(e),
    };

    respond(result, MSG_SIGNUP_FAILED)
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials or blocked user", body = ErrorBody),
        (status = 404, description = "Unknown username", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<LoginRequest>, WrapError>,
) -> Response {
    let result = match payload {
        Ok(ValidatedJson(request)) => state.auth_service.login(request).await,
        Err(e) => Err(e),
    };

    respond(result, MSG_LOGIN_FAILED)
}
