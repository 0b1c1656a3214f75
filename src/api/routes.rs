//! Application route configuration.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{admin_routes, auth_routes, user_routes};
use super::middleware::{admin_only, auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::types::{Failure, Success};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public signup and login
        .merge(auth_routes())
        // Protected user routes
        .nest(
            "/users",
            user_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Admin routes; the JWT check runs before the admin guard
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn(admin_only))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    database: &'static str,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> Response {
    match state.database.ping().await {
        Ok(()) => Success(HealthResponse {
            database: "healthy",
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            Failure::plain(
                StatusCode::SERVICE_UNAVAILABLE,
                "database unavailable",
                vec![e.to_string()],
            )
            .into_response()
        }
    }
}
