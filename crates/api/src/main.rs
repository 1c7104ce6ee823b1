use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mqhub_api::auth::password::hash_password;
use mqhub_api::config::ServerConfig;
use mqhub_api::{background, routes, state};
use mqhub_core::roles::ROLE_ADMIN;
use mqhub_db::models::user::CreateUser;
use mqhub_db::store::{DataBackend, DataStore, MemStore, PgStore};
use mqhub_events::{ActivityWriter, EventBus};
use mqhub_storage::s3::S3Config;
use mqhub_storage::{FileStore, LocalStore, S3Store, StorageBackend};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mqhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Data store ---
    let store: Arc<dyn DataStore> = match config.data_backend {
        DataBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = mqhub_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            mqhub_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            mqhub_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgStore::new(pool))
        }
        DataBackend::Memory => {
            tracing::warn!("Using the in-memory data backend; all data is lost on shutdown");
            Arc::new(MemStore::new())
        }
    };

    // --- First-run admin account ---
    bootstrap_admin(store.as_ref()).await;

    // --- File store ---
    let files: Arc<dyn FileStore> = match config.storage.backend {
        StorageBackend::Local => {
            tracing::info!(root = %config.storage.local_root, "Using local file storage");
            Arc::new(LocalStore::new(config.storage.local_root.clone()))
        }
        StorageBackend::S3 => {
            tracing::info!(bucket = %config.storage.s3_bucket, "Using S3 file storage");
            Arc::new(
                S3Store::connect(S3Config {
                    bucket: config.storage.s3_bucket.clone(),
                    region: config.storage.s3_region.clone(),
                    endpoint_url: config.storage.s3_endpoint.clone(),
                    access_key: config.storage.s3_access_key.clone(),
                    secret_key: config.storage.s3_secret_key.clone(),
                })
                .await,
            )
        }
    };

    // --- CORS ---
    let cors = build_cors_layer(&config);

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    tracing::info!("Event bus created");

    // Spawn the activity writer (persists all events to the activity log).
    let writer_handle = tokio::spawn(ActivityWriter::run(
        Arc::clone(&store),
        event_bus.subscribe(),
    ));

    // Spawn the session sweep (hourly purge of dead refresh sessions).
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(background::session_sweep::run(
        Arc::clone(&store),
        sweep_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        store,
        files,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    // --- Request ID header name ---
    let request_id_header = HeaderName::from_static("x-request-id");

    // --- Router ---
    let app = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        // API v1 routes.
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500 JSON.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS.
        .layer(cors)
        // Shared state.
        .with_state(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the session sweep.
    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Session sweep stopped");

    // Drop the event bus sender to close the broadcast channel. This
    // signals the activity writer to drain and exit.
    drop(event_bus);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        writer_handle,
    )
    .await;
    tracing::info!("Activity writer shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Seed the first admin account when the user table is empty.
///
/// Only runs when `ADMIN_PASSWORD` is set; `ADMIN_USERNAME` and
/// `ADMIN_EMAIL` default to `admin` / `admin@marquente.local`. A
/// non-empty user table is left untouched, so this is a no-op on every
/// start after the first.
async fn bootstrap_admin(store: &dyn DataStore) {
    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        return;
    };

    let users = store
        .list_users()
        .await
        .expect("Failed to list users during admin bootstrap");
    if !users.is_empty() {
        return;
    }

    let role = store
        .find_role_by_name(ROLE_ADMIN)
        .await
        .expect("Failed to look up the admin role")
        .expect("Roles must be seeded before admin bootstrap");

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@marquente.local".into());

    let password_hash = hash_password(&password).expect("Failed to hash the bootstrap password");

    let user = store
        .create_user(&CreateUser {
            username: username.clone(),
            email,
            password_hash,
            role_id: role.id,
            display_name: username,
            phone: None,
        })
        .await
        .expect("Failed to create the bootstrap admin user");

    tracing::info!(username = %user.username, "Bootstrap admin account created");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid, which is the
/// desired behaviour -- we want misconfiguration to fail fast.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
