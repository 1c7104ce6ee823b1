//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{Date, DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Free status string from the project catalog (`planning`, `active`,
    /// `on_hold`, `done`). Consumed for display-color mapping only.
    pub status: String,
    pub owner_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `planning` if omitted.
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub tags: Option<Vec<String>>,
}

/// Optional list filters for projects, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
    pub department_id: Option<DbId>,
}
