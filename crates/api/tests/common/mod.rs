//! Shared fixtures and request helpers for the HTTP-level API tests.
//!
//! All suites run against the in-memory data backend, so no database or
//! other external service is required. `build_test_app` mirrors the
//! router and middleware construction in `main.rs`; requests are driven
//! through `tower::ServiceExt::oneshot` without a TCP listener.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use mqhub_api::auth::jwt::{generate_access_token, JwtConfig};
use mqhub_api::auth::password::hash_password;
use mqhub_api::config::{ServerConfig, StorageConfig};
use mqhub_api::routes;
use mqhub_api::state::AppState;
use mqhub_core::types::DbId;
use mqhub_db::models::user::{CreateUser, UserResponse};
use mqhub_db::store::{DataBackend, DataStore, MemStore};
use mqhub_events::EventBus;
use mqhub_storage::{FileStore, LocalStore, StorageBackend};

/// JWT secret shared by the router under test and the token helpers below.
pub const TEST_JWT_SECRET: &str = "mqhub-test-jwt-secret-0123456789";

/// HMAC secret used for signed download URLs in tests.
pub const TEST_SIGNING_SECRET: &str = "mqhub-test-signing-secret";

/// Password used for every user created by [`create_test_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        data_backend: DataBackend::Memory,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            local_root: std::env::temp_dir()
                .join("mqhub-api-tests")
                .display()
                .to_string(),
            s3_bucket: String::new(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            s3_access_key: None,
            s3_secret_key: None,
            signing_secret: TEST_SIGNING_SECRET.to_string(),
            download_url_expiry_secs: 900,
        },
    }
}

/// Fresh in-memory store, shared between a test's seed calls and the
/// apps built from it.
pub fn new_store() -> Arc<MemStore> {
    Arc::new(MemStore::new())
}

/// Build the full application router over the given store with the same
/// middleware stack `main.rs` installs, so integration tests exercise
/// CORS, request IDs, timeouts, and panic recovery exactly as production
/// does.
pub fn build_test_app(store: Arc<MemStore>) -> Router {
    let files = Arc::new(LocalStore::new(std::env::temp_dir().join("mqhub-api-tests")));
    build_test_app_with_files(store, files)
}

/// Same as [`build_test_app`] but with an explicit file store; the asset
/// suite points this at a per-test temp directory.
pub fn build_test_app_with_files(store: Arc<MemStore>, files: Arc<dyn FileStore>) -> Router {
    let config = test_config();

    let state = AppState {
        store,
        files,
        config: Arc::new(config),
        event_bus: Arc::new(EventBus::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// User fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the store (password [`TEST_PASSWORD`]).
pub async fn create_test_user(store: &MemStore, username: &str, role_id: DbId) -> UserResponse {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
        role_id,
        display_name: username.to_string(),
        phone: None,
    };
    store
        .create_user(&input)
        .await
        .expect("user creation should succeed")
}

/// Create a user and mint a valid access token for it.
///
/// Access tokens are stateless JWTs, so tests that only need an
/// authenticated caller can skip the HTTP login round-trip.
pub async fn user_with_token(
    store: &MemStore,
    username: &str,
    role_id: DbId,
) -> (UserResponse, String) {
    let user = create_test_user(store, username, role_id).await;
    let role = store
        .role_name(user.role_id)
        .await
        .expect("role lookup should succeed");
    let token = generate_access_token(user.id, &role, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET without authentication.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body without authentication (login, refresh).
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT a JSON body with a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// DELETE with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect and parse the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
