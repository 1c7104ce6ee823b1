//! Refresh-token session model and DTOs.

use sqlx::FromRow;

use mqhub_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
///
/// The refresh token itself is never stored; only its SHA-256 hex digest.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
