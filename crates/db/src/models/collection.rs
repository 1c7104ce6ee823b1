//! Collection entity model and DTOs.
//!
//! A collection is a fashion line (e.g. "Verão 2026") moving from concept
//! to launch; assets and campaigns reference it by id.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{Date, DbId, Timestamp};

/// A collection row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Collection {
    pub id: DbId,
    pub name: String,
    pub season: Option<String>,
    pub description: Option<String>,
    /// Free status string from the collection catalog (`concept`,
    /// `development`, `production`, `launched`).
    pub status: String,
    pub launch_date: Option<Date>,
    pub piece_count: Option<i32>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new collection.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateCollection {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    pub season: Option<String>,
    pub description: Option<String>,
    /// Defaults to `concept` if omitted.
    pub status: Option<String>,
    pub launch_date: Option<Date>,
    #[validate(range(min = 0))]
    pub piece_count: Option<i32>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing collection. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateCollection {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    pub season: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub launch_date: Option<Date>,
    #[validate(range(min = 0))]
    pub piece_count: Option<i32>,
    pub tags: Option<Vec<String>>,
}

/// Optional list filters for collections, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionFilter {
    pub status: Option<String>,
    pub season: Option<String>,
}
