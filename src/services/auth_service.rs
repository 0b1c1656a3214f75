//! Authentication service - Signup, login and caller gating.
//!
//! Every failure leaves this module as a [`WrapError`] whose code tells the
//! HTTP layer which status to return. Nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::TokenService;
use crate::domain::{CurrentUser, NewUser, Password};
use crate::errors::{AppResult, ErrorCode, WrapError};
use crate::infra::{StoreError, UserRepository};

/// User signup request
///
/// Missing fields decode to their zero value and are rejected by validation.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(length(min = 1, message = "mail is required"))]
    #[schema(example = "j@x.com")]
    pub mail: String,
    #[validate(length(min = 1, message = "address is required"))]
    #[schema(example = "A")]
    pub address: String,
    #[validate(range(min = 1, message = "pincode is required"))]
    #[schema(example = 123456)]
    pub pincode: i64,
    #[validate(range(min = 1, message = "phonenumber is required"))]
    #[schema(example = 9876543210_i64)]
    pub phonenumber: i64,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "pw")]
    pub password: String,
    /// Grant administrator rights (defaults to false)
    pub isadmin: bool,
}

/// User login request
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "johndoe")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "pw")]
    pub password: String,
}

/// Result of a successful signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    #[schema(example = 1)]
    pub userid: i64,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token, valid for 24 hours
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return its id
    async fn signup(&self, request: SignupRequest) -> AppResult<SignupResponse>;

    /// Check credentials and the active flag, then issue a session token
    async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse>;

    /// Return the caller's id, provided the account is still active
    async fn resolve_caller_and_check_active(&self, caller: Option<&CurrentUser>)
        -> AppResult<i64>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, request: SignupRequest) -> AppResult<SignupResponse> {
        let password = Password::hash_blocking(request.password)
            .await
            .map_err(|e| WrapError::wrap(ErrorCode::CreateUser, "error while creating user", e))?;

        let new_user = NewUser {
            username: request.username,
            password: password.into_string(),
            address: request.address,
            pincode: request.pincode,
            phone_number: request.phonenumber,
            mail: request.mail,
            is_admin: request.isadmin,
        };

        let userid = self.users.save_user(new_user).await.map_err(|e| {
            tracing::warn!("Failed to create user: {}", e);
            WrapError::wrap(ErrorCode::CreateUser, "error while creating user", e)
        })?;
        tracing::info!("Successfully created user with id {}", userid);

        Ok(SignupResponse { userid })
    }

    async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = match self.users.get_user_by_username(&request.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!("User store returned no user and no error for a lookup");
                return Err(WrapError::wrap(
                    ErrorCode::UserNotFound,
                    "user not found",
                    StoreError::NotFound,
                ));
            }
            Err(e) if e.is_not_found() => {
                return Err(WrapError::wrap(ErrorCode::UserNotFound, "user not found", e));
            }
            Err(e) => {
                tracing::error!("User lookup failed during login: {}", e);
                return Err(WrapError::wrap(ErrorCode::LoginUser, "error during login", e));
            }
        };

        let matched = Password::from_hash(user.password.as_str())
            .verify_blocking(request.password)
            .await
            .map_err(|e| WrapError::wrap(ErrorCode::LoginUser, "error during login", e))?;
        if !matched {
            tracing::warn!("Invalid password for user {}", user.username);
            return Err(WrapError::wrap(
                ErrorCode::InvalidCredentials,
                "invalid password",
                format!("invalid password for user {}", user.username),
            ));
        }

        // Checked after the password so a wrong password never reveals the account state.
        if user.is_blocked() {
            tracing::warn!("Blocked user {} attempted to log in", user.username);
            return Err(WrapError::wrap(
                ErrorCode::UserBlocked,
                "user is blocked",
                format!("user {} is blocked", user.username),
            ));
        }

        let token = self
            .tokens
            .generate_token(user.id, &user.username, user.is_admin)
            .map_err(|e| WrapError::wrap(ErrorCode::GenerateToken, "failed to generate token", e))?;
        tracing::info!(
            "Generated token for user {} (Admin: {})",
            user.username,
            user.is_admin
        );

        Ok(LoginResponse { token })
    }

    async fn resolve_caller_and_check_active(
        &self,
        caller: Option<&CurrentUser>,
    ) -> AppResult<i64> {
        let caller = caller.ok_or_else(|| {
            WrapError::wrap(
                ErrorCode::ContextError,
                "error while getting userId from ctx",
                "user ID not found in request context",
            )
        })?;

        let active = self.users.is_user_active(caller.id).await.map_err(|e| {
            WrapError::wrap(ErrorCode::GetUserDetails, "error while checking user details", e)
        })?;

        if !active {
            tracing::info!("User {} is not active", caller.id);
            return Err(WrapError::bare(ErrorCode::UserBlocked, "user is blocked or inactive"));
        }

        Ok(caller.id)
    }
}
