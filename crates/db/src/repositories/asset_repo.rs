//! Repository for the `assets` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::asset::{Asset, AssetFilter, CreateAsset, UpdateAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, file_name, file_path, content_type, size_bytes, collection_id, \
                        campaign_id, uploaded_by, tags, created_at, updated_at";

/// Provides CRUD operations for asset metadata rows.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (file_name, file_path, content_type, size_bytes, \
                                 collection_id, campaign_id, uploaded_by, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.collection_id)
            .bind(input.campaign_id)
            .bind(input.uploaded_by)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an asset by its storage key. Used when redeeming download
    /// tokens, which carry the key rather than the id.
    pub async fn find_by_path(pool: &PgPool, file_path: &str) -> Result<Option<Asset>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assets WHERE file_path = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Asset>(&query)
            .bind(file_path)
            .fetch_optional(pool)
            .await
    }

    /// List assets with optional collection/campaign/uploader filters,
    /// newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &AssetFilter) -> Result<Vec<Asset>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.collection_id.is_some() {
            conditions.push(format!("collection_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.campaign_id.is_some() {
            conditions.push(format!("campaign_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.uploaded_by.is_some() {
            conditions.push(format!("uploaded_by = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Asset>(&query);
        if let Some(collection_id) = filter.collection_id {
            q = q.bind(collection_id);
        }
        if let Some(campaign_id) = filter.campaign_id {
            q = q.bind(campaign_id);
        }
        if let Some(uploaded_by) = filter.uploaded_by {
            q = q.bind(uploaded_by);
        }
        q.fetch_all(pool).await
    }

    /// Update asset metadata. Only non-`None` fields in `input` are
    /// applied; the stored file itself never changes.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                file_name = COALESCE($2, file_name),
                collection_id = COALESCE($3, collection_id),
                campaign_id = COALESCE($4, campaign_id),
                tags = COALESCE($5, tags),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.file_name)
            .bind(input.collection_id)
            .bind(input.campaign_id)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an asset row. Returns `true` if a live row was marked.
    ///
    /// The stored object is kept; hiding the row is enough to stop
    /// download tokens from resolving.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over file names, newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE deleted_at IS NULL AND file_name ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
