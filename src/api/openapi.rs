//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, auth_handler, user_handler};
use crate::domain::UserProfile;
use crate::services::{
    LoginRequest, LoginResponse, SignupRequest, SignupResponse, UserStatusResponse,
};
use crate::types::ErrorBody;

/// OpenAPI documentation for the storefront auth API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Auth",
        version = "0.1.0",
        description = "User signup, login and account blocking for the storefront backend"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        user_handler::get_current_user,
        admin_handler::block_user,
        admin_handler::unblock_user,
    ),
    components(
        schemas(
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            UserProfile,
            UserStatusResponse,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User signup and login"),
        (name = "Users", description = "Authenticated user operations"),
        (name = "Admin", description = "Account blocking, admin only")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
