//! UGC creator entity model and DTOs.
//!
//! Influencers and user-generated-content partners the marketing team
//! tracks through the relationship funnel (`prospect` through `active`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{DbId, Timestamp};

/// A creator row from the `ugc_creators` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Creator {
    pub id: DbId,
    pub name: String,
    /// Platform handle, stored without the leading `@`.
    pub handle: String,
    pub platform: String,
    pub followers: i64,
    pub engagement_rate: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rate_per_post: Option<f64>,
    /// Free status string from the creator funnel catalog (`prospect`,
    /// `contacted`, `negotiating`, `active`, `inactive`).
    pub status: String,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new creator.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateCreator {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub handle: String,
    /// One of `instagram`, `tiktok`, `youtube`.
    pub platform: String,
    #[validate(range(min = 0))]
    pub followers: Option<i64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub engagement_rate: Option<f64>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(range(min = 0.0))]
    pub rate_per_post: Option<f64>,
    /// Defaults to `prospect` if omitted.
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// DTO for updating an existing creator. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateCreator {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub handle: Option<String>,
    pub platform: Option<String>,
    #[validate(range(min = 0))]
    pub followers: Option<i64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub engagement_rate: Option<f64>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(range(min = 0.0))]
    pub rate_per_post: Option<f64>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Optional list filters for creators, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatorFilter {
    pub status: Option<String>,
    pub platform: Option<String>,
}
