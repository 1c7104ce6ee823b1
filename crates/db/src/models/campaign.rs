//! Campaign entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{Date, DbId, Timestamp};

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Collection this campaign promotes; resolved client-side.
    pub collection_id: Option<DbId>,
    /// Marketing channel label (e.g. `instagram`, `email`, `out-of-home`).
    pub channel: Option<String>,
    /// Free status string from the campaign catalog (`draft`, `scheduled`,
    /// `running`, `done`).
    pub status: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub budget: Option<f64>,
    /// Ad-hoc line items entered in the SPA; opaque JSON array of objects.
    /// NOT NULL in the database; defaults to `[]`.
    pub investments: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new campaign.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 160))]
    pub name: String,
    pub description: Option<String>,
    pub collection_id: Option<DbId>,
    pub channel: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    pub investments: Option<serde_json::Value>,
}

/// DTO for updating an existing campaign. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 160))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub collection_id: Option<DbId>,
    pub channel: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    pub investments: Option<serde_json::Value>,
}

/// Optional list filters for campaigns, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignFilter {
    pub status: Option<String>,
    pub collection_id: Option<DbId>,
}
