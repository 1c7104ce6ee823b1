//! Task entity model and DTOs.
//!
//! Tasks are nested under projects:
//! `/projects/{project_id}/tasks` for list/create, `/tasks/{id}` for the rest.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{Date, DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Free status string from the task catalog (`todo`, `in_progress`,
    /// `review`, `blocked`, `done`).
    pub status: String,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<Date>,
    pub priority: String,
    /// Human-entered reason, only meaningful while `status == "blocked"`.
    pub blocked_reason: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateTask {
    /// Overridden by the `project_id` path segment on the nested route.
    #[serde(default)]
    pub project_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    pub status: Option<String>,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<Date>,
    /// Defaults to `normal` if omitted.
    pub priority: Option<String>,
    pub blocked_reason: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee_id: Option<DbId>,
    pub due_date: Option<Date>,
    pub priority: Option<String>,
    pub blocked_reason: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Optional list filters for tasks, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub assignee_id: Option<DbId>,
    pub priority: Option<String>,
}
