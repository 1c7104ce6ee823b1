use mqhub_db::store::DataBackend;
use mqhub_storage::StorageBackend;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// JWT secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Which [`DataBackend`] backs the process (default: `postgres`).
    pub data_backend: DataBackend,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// File storage configuration (backend, paths, signing secret).
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATA_BACKEND`         | `postgres`                 |
    ///
    /// # Panics
    ///
    /// Panics on malformed values and on a missing `JWT_SECRET`; startup
    /// misconfiguration should fail fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let data_backend: DataBackend = std::env::var("DATA_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("DATA_BACKEND: {e}"));

        let jwt = JwtConfig::from_env();
        let storage = StorageConfig::from_env(&jwt.secret);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            data_backend,
            jwt,
            storage,
        }
    }
}

/// File storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Which file store backs uploads (default: `local`).
    pub backend: StorageBackend,
    /// Root directory for the local backend (default: `./data/assets`).
    pub local_root: String,
    /// Bucket name for the S3 backend.
    pub s3_bucket: String,
    /// AWS region for the S3 backend (default: `us-east-1`).
    pub s3_region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2).
    pub s3_endpoint: Option<String>,
    /// Static S3 credentials; when absent the SDK provider chain is used.
    pub s3_access_key: Option<String>,
    pub s3_secret_key: Option<String>,
    /// HMAC secret for signed download URLs. Falls back to the JWT
    /// secret when `STORAGE_SIGNING_SECRET` is unset.
    pub signing_secret: String,
    /// Lifetime of signed download URLs in seconds (default: `900`).
    pub download_url_expiry_secs: i64,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                     | Default         |
    /// |-----------------------------|-----------------|
    /// | `STORAGE_BACKEND`           | `local`         |
    /// | `STORAGE_ROOT`              | `./data/assets` |
    /// | `S3_BUCKET`                 | --              |
    /// | `S3_REGION`                 | `us-east-1`     |
    /// | `S3_ENDPOINT`               | --              |
    /// | `S3_ACCESS_KEY`             | --              |
    /// | `S3_SECRET_KEY`             | --              |
    /// | `STORAGE_SIGNING_SECRET`    | the JWT secret  |
    /// | `DOWNLOAD_URL_EXPIRY_SECS`  | `900`           |
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BACKEND=s3` and `S3_BUCKET` is unset.
    pub fn from_env(fallback_signing_secret: &str) -> Self {
        let backend: StorageBackend = std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORAGE_BACKEND: {e}"));

        let local_root =
            std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./data/assets".into());

        let s3_bucket = std::env::var("S3_BUCKET").unwrap_or_default();
        if backend == StorageBackend::S3 {
            assert!(
                !s3_bucket.is_empty(),
                "S3_BUCKET must be set when STORAGE_BACKEND=s3"
            );
        }

        let s3_region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into());
        let s3_endpoint = std::env::var("S3_ENDPOINT").ok();
        let s3_access_key = std::env::var("S3_ACCESS_KEY").ok();
        let s3_secret_key = std::env::var("S3_SECRET_KEY").ok();

        let signing_secret = std::env::var("STORAGE_SIGNING_SECRET")
            .unwrap_or_else(|_| fallback_signing_secret.to_string());

        let download_url_expiry_secs: i64 = std::env::var("DOWNLOAD_URL_EXPIRY_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("DOWNLOAD_URL_EXPIRY_SECS must be a valid i64");

        Self {
            backend,
            local_root,
            s3_bucket,
            s3_region,
            s3_endpoint,
            s3_access_key,
            s3_secret_key,
            signing_secret,
            download_url_expiry_secs,
        }
    }
}
