//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Errors produced by domain and store logic, independent of HTTP.
///
/// The API layer maps each variant to a status code and stable error code;
/// see `AppError` in the api crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state (e.g. duplicate unique value).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure; message is logged, not surfaced.
    #[error("Internal error: {0}")]
    Internal(String),
}
