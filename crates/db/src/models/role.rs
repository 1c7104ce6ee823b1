//! Role entity model.
//!
//! Roles are a small seeded lookup table (`admin`, `manager`, `member`);
//! the catalog of valid names lives in `mqhub_core::roles`.

use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

use mqhub_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
