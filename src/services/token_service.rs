//! Session token service - Issues and validates signed JWTs.
//!
//! Tokens are HS256-signed and stateless: validity depends only on the
//! signature and the embedded expiration at the moment of validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TOKEN_TTL_HOURS;
use crate::domain::CurrentUser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "isadmin")]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Token issuance and validation failures.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Token service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token valid for 24 hours
    fn generate_token(&self, user_id: i64, username: &str, is_admin: bool)
        -> Result<String, TokenError>;

    /// Verify signature and expiration, returning the embedded claims
    fn validate_token(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 implementation of [`TokenService`] holding the signing key.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(secret: &[u8]) -> Self {
        // Expiration is checked against an explicit instant in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        now: DateTime<Utc>,
        user_id: i64,
        username: &str,
        is_admin: bool,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            username: username.to_string(),
            is_admin,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Validate a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e),
            })?
            .claims;

        if claims.exp < now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        is_admin: bool,
    ) -> Result<String, TokenError> {
        self.issue_at(Utc::now(), user_id, username, is_admin)
    }

    fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }
}
