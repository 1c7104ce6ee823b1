//! Activity-log entry model and DTOs.
//!
//! Rows are appended by the event-persistence task; the dashboard's
//! activity feed reads them newest-first. Append-only, no updates.

use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

use mqhub_core::types::{DbId, Timestamp};

/// An activity row from the `activity_log` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    pub id: DbId,
    /// Dotted event name, e.g. `project.created`, `ticket.status_changed`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    /// Event-specific details. NOT NULL in the database; defaults to `{}`.
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending an activity entry.
#[derive(Debug, Clone)]
pub struct NewActivityEntry {
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
}
