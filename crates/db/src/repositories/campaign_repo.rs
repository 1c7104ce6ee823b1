//! Repository for the `campaigns` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::campaign::{Campaign, CampaignFilter, CreateCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, collection_id, channel, status, start_date, \
                        end_date, budget, investments, created_at, updated_at";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    ///
    /// If `status` is `None`, defaults to `draft`; `investments` defaults
    /// to an empty JSON array.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (name, description, collection_id, channel, status, \
                                    start_date, end_date, budget, investments)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'), $6, $7, $8, \
                     COALESCE($9, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.collection_id)
            .bind(&input.channel)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.investments)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List campaigns with optional status/collection filters, newest
    /// first. Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &CampaignFilter,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.collection_id.is_some() {
            conditions.push(format!("collection_id = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM campaigns WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Campaign>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(collection_id) = filter.collection_id {
            q = q.bind(collection_id);
        }
        q.fetch_all(pool).await
    }

    /// Update a campaign. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                collection_id = COALESCE($4, collection_id),
                channel = COALESCE($5, channel),
                status = COALESCE($6, status),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                budget = COALESCE($9, budget),
                investments = COALESCE($10, investments),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.collection_id)
            .bind(&input.channel)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.investments)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a campaign. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE campaigns SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over campaign names, newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE deleted_at IS NULL AND name ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
