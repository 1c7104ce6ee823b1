//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{DbId, Timestamp};

/// A department row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    /// Department lead; references `users`, resolved client-side.
    pub lead_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new department.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    pub lead_id: Option<DbId>,
}

/// DTO for updating an existing department. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub slug: Option<String>,
    pub lead_id: Option<DbId>,
}
