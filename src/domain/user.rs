//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string, never the plaintext
    pub password: String,
    pub address: String,
    pub pincode: i64,
    pub phone_number: i64,
    pub mail: String,
    /// Active flag; `false` means the account is blocked
    pub status: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account is blocked
    pub fn is_blocked(&self) -> bool {
        !self.status
    }
}

/// Data required to persist a new user.
///
/// `password` must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub address: String,
    pub pincode: i64,
    pub phone_number: i64,
    pub mail: String,
    pub is_admin: bool,
}

/// Authenticated caller, established by the JWT middleware and passed
/// explicitly to the services that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// User profile (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    #[schema(example = 1)]
    pub userid: i64,
    #[schema(example = "johndoe")]
    pub username: String,
    #[schema(example = "j@x.com")]
    pub mail: String,
    #[schema(example = "221B Baker Street")]
    pub address: String,
    #[schema(example = 123456)]
    pub pincode: i64,
    #[schema(example = 9876543210_i64)]
    pub phonenumber: i64,
    pub isadmin: bool,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            userid: user.id,
            username: user.username,
            mail: user.mail,
            address: user.address,
            pincode: user.pincode,
            phonenumber: user.phone_number,
            isadmin: user.is_admin,
            status: user.status,
            created_at: user.created_at,
        }
    }
}
