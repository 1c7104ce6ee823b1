//! File storage for marketing assets.
//!
//! [`FileStore`] abstracts over where asset bytes live so the rest of the
//! application never touches a filesystem path or an S3 client directly:
//!
//! - [`LocalStore`]: directory on the local disk, used in development
//!   and in the test suite.
//! - [`S3Store`]: S3-compatible object storage (AWS or any endpoint that
//!   speaks the protocol).
//!
//! Download links do not expose storage keys directly; [`signing`] issues
//! expiring HMAC tokens that the download route redeems.

use std::str::FromStr;

use async_trait::async_trait;

pub mod local;
pub mod s3;
pub mod signing;

pub use local::LocalStore;
pub use s3::S3Store;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested key does not exist in the backend.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The key is empty, absolute, or attempts path traversal.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A download token failed signature verification or did not parse.
    #[error("invalid download token")]
    InvalidToken,

    /// A download token was valid but past its expiry.
    #[error("download token expired")]
    TokenExpired,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped S3 SDK error, stringified at the call site.
    #[error("s3 error: {0}")]
    S3(String),
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Which [`FileStore`] implementation to run, from `STORAGE_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(format!(
                "unknown storage backend '{other}' (expected 'local' or 's3')"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Asset byte storage.
///
/// Keys are forward-slash separated relative paths generated by the upload
/// handler (e.g. `assets/3f2a.../lookbook.pdf`). Implementations must
/// reject keys that would escape their root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` under `key`, overwriting any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Fetch the full contents stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove the object under `key`. Removing a missing key is not an
    /// error; the caller cannot tell the difference after the fact.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Short backend label for the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Reject keys that are empty, absolute, or contain traversal segments.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    if key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("local".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!("S3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert!("gcs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn traversal_keys_are_rejected() {
        assert!(validate_key("assets/ab/file.png").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("assets/../secret").is_err());
        assert!(validate_key("assets//file").is_err());
        assert!(validate_key("assets\\file").is_err());
        assert!(validate_key("./file").is_err());
    }
}
