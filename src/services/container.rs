//! Service container - Wires repositories and services together.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AuthService, Authenticator, JwtTokenService, TokenService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{UserRepository, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get session token service
    fn tokens(&self) -> Arc<dyn TokenService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    token_service: Arc<dyn TokenService>,
}

impl Services {
    /// Build every service around one user repository and token service.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), tokens.clone())),
            user_service: Arc::new(UserManager::new(users)),
            token_service: tokens,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db));
        let tokens: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.jwt_secret_bytes()));

        Self::new(users, tokens)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenService> {
        self.token_service.clone()
    }
}
