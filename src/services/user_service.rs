//! User service - Profile lookup and account blocking.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::UserProfile;
use crate::errors::{AppResult, ErrorCode, WrapError};
use crate::infra::{StoreError, UserRepository};

/// New account state after a block or unblock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserStatusResponse {
    #[schema(example = 2)]
    pub userid: i64,
    /// `false` when blocked
    pub status: bool,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get the profile of a user
    async fn get_profile(&self, user_id: i64) -> AppResult<UserProfile>;

    /// Mark a user inactive so login and authenticated routes reject it
    async fn block_user(&self, user_id: i64) -> AppResult<UserStatusResponse>;

    /// Reactivate a blocked user
    async fn unblock_user(&self, user_id: i64) -> AppResult<UserStatusResponse>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    async fn set_status(
        &self,
        user_id: i64,
        active: bool,
        code: ErrorCode,
        message: &str,
    ) -> AppResult<UserStatusResponse> {
        self.users
            .set_user_status(user_id, active)
            .await
            .map_err(|e| store_error(e, code, message))?;

        tracing::info!("User {} status set to {}", user_id, active);
        Ok(UserStatusResponse {
            userid: user_id,
            status: active,
        })
    }
}

fn store_error(err: StoreError, code: ErrorCode, message: &str) -> WrapError {
    if err.is_not_found() {
        return WrapError::wrap(ErrorCode::UserNotFound, "user not found", err);
    }
    tracing::error!("{}: {}", message, err);
    WrapError::wrap(code, message, err)
}

#[async_trait]
impl UserService for UserManager {
    async fn get_profile(&self, user_id: i64) -> AppResult<UserProfile> {
        self.users
            .get_user_by_id(user_id)
            .await
            .map(UserProfile::from)
            .map_err(|e| store_error(e, ErrorCode::GetUserDetails, "error while getting user details"))
    }

    async fn block_user(&self, user_id: i64) -> AppResult<UserStatusResponse> {
        self.set_status(user_id, false, ErrorCode::BlockUser, "error while blocking user")
            .await
    }

    async fn unblock_user(&self, user_id: i64) -> AppResult<UserStatusResponse> {
        self.set_status(user_id, true, ErrorCode::UnblockUser, "error while unblocking user")
            .await
    }
}
