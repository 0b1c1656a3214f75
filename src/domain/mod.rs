//! Domain layer - Core business entities and logic
//!
//! Contains the user entity, the data needed to create one, and the
//! password digest value object. No infrastructure concerns live here.

pub mod password;
pub mod user;

pub use password::{Password, PasswordError};
pub use user::{CurrentUser, NewUser, User, UserProfile};
