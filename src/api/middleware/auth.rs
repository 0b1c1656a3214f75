//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::config::{
    BEARER_TOKEN_PREFIX, MSG_ADMIN_REQUIRED, MSG_INVALID_TOKEN, MSG_INVALID_TOKEN_FORMAT,
    MSG_MISSING_AUTH_HEADER, MSG_TOKEN_EXPIRED,
};
use crate::domain::CurrentUser;
use crate::services::TokenError;
use crate::types::Failure;

fn unauthorized(message: &str, detail: String) -> Response {
    Failure::plain(StatusCode::UNAUTHORIZED, message, vec![detail]).into_response()
}

/// JWT authentication middleware.
///
/// Validates the bearer token and injects the [`CurrentUser`] into the
/// request extensions. Whether the account is still active is checked later
/// by the handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = request.headers().get(AUTHORIZATION) else {
        return unauthorized(MSG_MISSING_AUTH_HEADER, String::new());
    };

    let token = match auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_TOKEN_PREFIX))
    {
        Some(token) => token.to_string(),
        None => return unauthorized(MSG_INVALID_TOKEN_FORMAT, String::new()),
    };

    let claims = match state.token_service.validate_token(&token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => return unauthorized(MSG_TOKEN_EXPIRED, String::new()),
        Err(e) => {
            tracing::debug!("Rejected token: {}", e);
            return unauthorized(MSG_INVALID_TOKEN, e.to_string());
        }
    };

    request.extensions_mut().insert(CurrentUser::from(claims));

    next.run(request).await
}

/// Admin guard; must run after [`auth_middleware`].
pub async fn admin_only(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(|user| user.is_admin);

    if !is_admin {
        return Failure::plain(StatusCode::FORBIDDEN, MSG_ADMIN_REQUIRED, vec![String::new()])
            .into_response();
    }

    next.run(request).await
}
