//! API middleware.

mod auth;

pub use auth::{admin_only, auth_middleware};
