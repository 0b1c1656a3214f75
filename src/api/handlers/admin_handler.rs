//! Admin handlers for blocking and unblocking accounts.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Response,
    routing::patch,
    Extension, Router,
};

use crate::api::AppState;
use crate::config::{MSG_BLOCK_FAILED, MSG_UNBLOCK_FAILED};
use crate::domain::CurrentUser;
use crate::errors::{AppResult, ErrorCode, WrapError};
use crate::services::UserStatusResponse;
use crate::types::{respond, ErrorBody};

/// Create admin routes (JWT and admin guards are applied by the router)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:userid/block", patch(block_user))
        .route("/users/:userid/unblock", patch(unblock_user))
}

fn target_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(userid)| userid).map_err(|e| {
        WrapError::wrap(ErrorCode::DecodeRequestBody, "error while parsing", e.body_text())
    })
}

async fn set_status(
    state: &AppState,
    caller: Option<&CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    active: bool,
) -> AppResult<UserStatusResponse> {
    let admin_id = state.auth_service.resolve_caller_and_check_active(caller).await?;
    let userid = target_id(path)?;
    tracing::info!(
        "Admin {} is setting status of user {} to {}",
        admin_id,
        userid,
        active
    );

    if active {
        state.user_service.unblock_user(userid).await
    } else {
        state.user_service.block_user(userid).await
    }
}

/// Block a user
#[utoipa::path(
    patch,
    path = "/admin/users/{userid}/block",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("userid" = i64, Path, description = "Id of the user to block")),
    responses(
        (status = 200, description = "User blocked", body = UserStatusResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn block_user(
    State(state): State<AppState>,
    caller: Option<Extension<CurrentUser>>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let caller = caller.as_ref().map(|Extension(user)| user);
    respond(set_status(&state, caller, path, false).await, MSG_BLOCK_FAILED)
}

/// Unblock a user
#[utoipa::path(
    patch,
    path = "/admin/users/{userid}/unblock",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("userid" = i64, Path, description = "Id of the user to unblock")),
    responses(
        (status = 200, description = "User unblocked", body = UserStatusResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn unblock_user(
    State(state): State<AppState>,
    caller: Option<Extension<CurrentUser>>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let caller = caller.as_ref().map(|Extension(user)| user);
    respond(set_status(&state, caller, path, true).await, MSG_UNBLOCK_FAILED)
}
