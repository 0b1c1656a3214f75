//! Application settings loaded from environment variables.

use std::env;

use thiserror::Error;

use super::constants::{
    DEFAULT_DATABASE_PORT, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};

/// Configuration errors raised at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set in production")]
    MissingSecret,

    #[error("JWT_SECRET must be at least {min} characters long")]
    SecretTooShort { min: usize },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration from explicit values, using default server settings.
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_JWT_SECRET_LENGTH,
            });
        }

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    /// Load configuration from environment variables (and `.env` when present).
    ///
    /// Debug builds fall back to a development secret when `JWT_SECRET` is
    /// unset; release builds refuse to start without one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::MissingSecret),
        };

        let mut config = Self::new(database_url_from(|key| env::var(key).ok()), jwt_secret)?;

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }

        Ok(config)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Resolve the database URL.
///
/// `DATABASE_URL` wins. Otherwise the URL is assembled from `DB_USER`,
/// `DB_PASSWORD`, `DB_HOST`, `DB_PORT` and `DB_NAME` when host and name are
/// both present.
fn database_url_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    if let Some(url) = lookup("DATABASE_URL") {
        return url;
    }

    match (lookup("DB_HOST"), lookup("DB_NAME")) {
        (Some(host), Some(name)) => {
            let user = lookup("DB_USER").unwrap_or_default();
            let password = lookup("DB_PASSWORD").unwrap_or_default();
            let port = lookup("DB_PORT").unwrap_or_else(|| DEFAULT_DATABASE_PORT.to_string());
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        }
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}
