//! Integration tests for API endpoints.
//!
//! Each test builds the full router over a fresh in-memory SQLite database
//! and drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_auth::api::{create_router, AppState};
use storefront_auth::config::Config;
use storefront_auth::infra::Database;
use storefront_auth::services::JwtTokenService;

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

async fn test_app() -> Router {
    let config = Config::new("sqlite::memory:", SECRET).unwrap();
    let db = Database::connect(&config.database_url).await.unwrap();
    create_router(AppState::from_config(Arc::new(db), &config))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn signup_body(username: &str, isadmin: bool) -> Value {
    json!({
        "username": username,
        "mail": format!("{username}@x.com"),
        "address": "A",
        "pincode": 123456,
        "phonenumber": 9876543210_i64,
        "password": "pw",
        "isadmin": isadmin
    })
}

async fn signup(app: &Router, username: &str, isadmin: bool) -> i64 {
    let (status, body) = call(app, Method::POST, "/signup", None, Some(signup_body(username, isadmin))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["result"]["userid"].as_i64().unwrap()
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": username, "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["result"]["token"].as_str().unwrap().to_string()
}

fn error_code(body: &Value) -> i64 {
    body["error"]["code"].as_i64().unwrap()
}

// =============================================================================
// Signup and login
// =============================================================================

#[tokio::test]
async fn test_signup_then_wrong_password() {
    let app = test_app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/signup",
        None,
        Some(json!({
            "username": "johndoe",
            "mail": "j@x.com",
            "address": "A",
            "pincode": 123456,
            "phonenumber": 9876543210_i64,
            "password": "pw"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "result": {"userid": 1}}));

    let (status, body) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "johndoe", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "status": "notok",
            "error": {
                "code": 400027,
                "message": "failed to login user",
                "details": ["invalid password for user johndoe"]
            }
        })
    );
}

#[tokio::test]
async fn test_login_success_returns_token() {
    let app = test_app().await;
    signup(&app, "johndoe", false).await;

    let token = login(&app, "johndoe").await;
    let claims = JwtTokenService::new(SECRET.as_bytes())
        .verify_at(&token, Utc::now())
        .unwrap();
    assert_eq!(claims.user_id, 1);
    assert_eq!(claims.username, "johndoe");
    assert!(!claims.is_admin);
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = test_app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "ghost", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 404001);
    assert_eq!(body["error"]["message"], "failed to login user");
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = test_app().await;
    signup(&app, "johndoe", false).await;

    let (status, body) = call(&app, Method::POST, "/signup", None, Some(signup_body("johndoe", false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400004);
    assert_eq!(body["error"]["message"], "failed to create user");
}

#[tokio::test]
async fn test_signup_malformed_json() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error_code(&body), 400001);
    assert_eq!(body["error"]["message"], "failed to create user");
}

#[tokio::test]
async fn test_signup_wrong_field_type_is_decode_error() {
    let app = test_app().await;
    let mut body = signup_body("johndoe", false);
    body["pincode"] = json!("not-a-number");

    let (status, body) = call(&app, Method::POST, "/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400001);
}

#[tokio::test]
async fn test_signup_missing_field_is_validation_error() {
    let app = test_app().await;
    let mut body = signup_body("johndoe", false);
    body.as_object_mut().unwrap().remove("mail");

    let (status, body) = call(&app, Method::POST, "/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400002);
    assert_eq!(body["error"]["details"], json!(["mail is required"]));
}

#[tokio::test]
async fn test_login_missing_password_is_validation_error() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::POST, "/login", None, Some(json!({"username": "johndoe"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400002);
    assert_eq!(body["error"]["message"], "failed to login user");
}

// =============================================================================
// JWT middleware
// =============================================================================

#[tokio::test]
async fn test_profile_requires_authorization_header() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::GET, "/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({
            "status": "notok",
            "error": {"code": 401, "message": "Authorization header is missing", "details": [""]}
        })
    );
}

#[tokio::test]
async fn test_profile_rejects_non_bearer_header() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/users/me")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["message"], "Invalid token format");
    assert_eq!(body["error"]["details"], json!([""]));
}

#[tokio::test]
async fn test_profile_rejects_expired_token() {
    let app = test_app().await;
    signup(&app, "johndoe", false).await;

    let token = JwtTokenService::new(SECRET.as_bytes())
        .issue_at(Utc::now() - Duration::hours(48), 1, "johndoe", false)
        .unwrap();

    let (status, body) = call(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Token expired, please log in again");
    assert_eq!(body["error"]["details"], json!([""]));
}

#[tokio::test]
async fn test_profile_rejects_foreign_signature() {
    let app = test_app().await;

    let token = JwtTokenService::new(b"another-secret-key-for-testing-32chars!")
        .issue_at(Utc::now(), 1, "johndoe", true)
        .unwrap();

    let (status, body) = call(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid token");
    assert_eq!(body["error"]["details"], json!(["signature is invalid"]));
}

#[tokio::test]
async fn test_profile_of_current_user() {
    let app = test_app().await;
    let userid = signup(&app, "johndoe", false).await;
    let token = login(&app, "johndoe").await;

    let (status, body) = call(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["userid"], json!(userid));
    assert_eq!(body["result"]["username"], "johndoe");
    assert_eq!(body["result"]["status"], json!(true));
    assert_eq!(body["result"]["isadmin"], json!(false));
    assert!(body["result"].get("password").is_none());
}

// =============================================================================
// Admin block / unblock
// =============================================================================

#[tokio::test]
async fn test_block_requires_admin() {
    let app = test_app().await;
    signup(&app, "johndoe", false).await;
    let token = login(&app, "johndoe").await;

    let (status, body) = call(&app, Method::PATCH, "/admin/users/1/block", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({
            "status": "notok",
            "error": {"code": 403, "message": "Admin access required", "details": [""]}
        })
    );
}

#[tokio::test]
async fn test_block_unknown_user() {
    let app = test_app().await;
    signup(&app, "admin", true).await;
    let token = login(&app, "admin").await;

    let (status, body) = call(&app, Method::PATCH, "/admin/users/99/block", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 404001);
    assert_eq!(body["error"]["message"], "failed to block user");
}

#[tokio::test]
async fn test_block_and_unblock_flow() {
    let app = test_app().await;
    signup(&app, "admin", true).await;
    let userid = signup(&app, "johndoe", false).await;
    let admin_token = login(&app, "admin").await;
    let user_token = login(&app, "johndoe").await;

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/admin/users/{userid}/block"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({"userid": userid, "status": false}));

    // Tokens issued before the block stop working on authenticated routes.
    let (status, body) = call(&app, Method::GET, "/users/me", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400028);
    assert_eq!(body["error"]["details"], json!(["user is blocked or inactive"]));

    // Correct password, blocked account.
    let (status, body) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "johndoe", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 400028);
    assert_eq!(body["error"]["details"], json!(["user johndoe is blocked"]));

    // Wrong password still reports the credential failure first.
    let (_, body) = call(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "johndoe", "password": "wrong"})),
    )
    .await;
    assert_eq!(error_code(&body), 400027);

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/admin/users/{userid}/unblock"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({"userid": userid, "status": true}));

    let (status, _) = call(&app, Method::GET, "/users/me", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Operational endpoints
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "result": {"database": "healthy"}}));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;

    let (status, body) = call(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/signup").is_some());
    assert!(body["paths"].get("/admin/users/{userid}/block").is_some());
}
