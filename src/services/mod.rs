//! Application services layer - Use cases and business logic.
//!
//! Services depend on the [`UserRepository`](crate::infra::UserRepository)
//! and [`TokenService`] traits, so tests can swap in mocks.

mod auth_service;
pub mod container;
mod token_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
};
pub use token_service::{Claims, JwtTokenService, TokenError, TokenService};
pub use user_service::{UserManager, UserService, UserStatusResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use token_service::MockTokenService;
