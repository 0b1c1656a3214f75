//! Handlers for the authenticated caller's own account.

use axum::{extract::State, response::Response, routing::get, Extension, Router};

use crate::api::AppState;
use crate::config::MSG_PROFILE_FAILED;
use crate::domain::{CurrentUser, UserProfile};
use crate::errors::AppResult;
use crate::types::{respond, ErrorBody};

/// Create user routes (JWT middleware is applied by the router)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 400, description = "User is blocked", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: Option<Extension<CurrentUser>>,
) -> Response {
    let caller = caller.as_ref().map(|Extension(user)| user);
    respond(profile(&state, caller).await, MSG_PROFILE_FAILED)
}

async fn profile(state: &AppState, caller: Option<&CurrentUser>) -> AppResult<UserProfile> {
    let user_id = state.auth_service.resolve_caller_and_check_active(caller).await?;
    state.user_service.get_profile(user_id).await
}
