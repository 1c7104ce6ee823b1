//! Marketing-asset entity model and DTOs.
//!
//! An asset row is the metadata record for an uploaded file; the bytes
//! live in the file store under `file_path`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{DbId, Timestamp};

/// An asset row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Asset {
    pub id: DbId,
    /// Original upload filename, shown in the library UI.
    pub file_name: String,
    /// Storage key within the file store. Not a filesystem path.
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new asset row after the file is stored.
///
/// Built by the upload handler, never deserialized from a request body.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub file_name: String,
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub tags: Vec<String>,
}

/// DTO for updating asset metadata. All fields are optional; the stored
/// file itself is immutable.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 255))]
    pub file_name: Option<String>,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
}

/// Optional list filters for assets, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFilter {
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
}
