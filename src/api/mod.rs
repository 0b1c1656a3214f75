//! API layer - HTTP handlers and middleware
//!
//! Handlers never build error bodies themselves; every outcome goes through
//! the envelope in [`crate::types`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
