//! Repository for the `ugc_creators` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::creator::{CreateCreator, Creator, CreatorFilter, UpdateCreator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, handle, platform, followers, engagement_rate, email, phone, \
                        rate_per_post, status, tags, notes, created_at, updated_at";

/// Provides CRUD operations for UGC creators.
pub struct CreatorRepo;

impl CreatorRepo {
    /// Insert a new creator, returning the created row.
    ///
    /// If `status` is `None`, defaults to `prospect`; `followers` defaults
    /// to 0.
    pub async fn create(pool: &PgPool, input: &CreateCreator) -> Result<Creator, sqlx::Error> {
        let query = format!(
            "INSERT INTO ugc_creators (name, handle, platform, followers, engagement_rate, \
                                       email, phone, rate_per_post, status, tags, notes)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5, $6, $7, $8, \
                     COALESCE($9, 'prospect'), COALESCE($10, '{{}}'), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creator>(&query)
            .bind(&input.name)
            .bind(&input.handle)
            .bind(&input.platform)
            .bind(input.followers)
            .bind(input.engagement_rate)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.rate_per_post)
            .bind(&input.status)
            .bind(&input.tags)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a creator by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Creator>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ugc_creators WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Creator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List creators with optional status/platform filters, newest first.
    /// Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &CreatorFilter) -> Result<Vec<Creator>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.platform.is_some() {
            conditions.push(format!("platform = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM ugc_creators WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Creator>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(platform) = &filter.platform {
            q = q.bind(platform);
        }
        q.fetch_all(pool).await
    }

    /// Update a creator. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCreator,
    ) -> Result<Option<Creator>, sqlx::Error> {
        let query = format!(
            "UPDATE ugc_creators SET
                name = COALESCE($2, name),
                handle = COALESCE($3, handle),
                platform = COALESCE($4, platform),
                followers = COALESCE($5, followers),
                engagement_rate = COALESCE($6, engagement_rate),
                email = COALESCE($7, email),
                phone = COALESCE($8, phone),
                rate_per_post = COALESCE($9, rate_per_post),
                status = COALESCE($10, status),
                tags = COALESCE($11, tags),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creator>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.handle)
            .bind(&input.platform)
            .bind(input.followers)
            .bind(input.engagement_rate)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.rate_per_post)
            .bind(&input.status)
            .bind(&input.tags)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a creator. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ugc_creators SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over creator names and handles,
    /// newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Creator>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ugc_creators
             WHERE deleted_at IS NULL AND (name ILIKE $1 OR handle ILIKE $1)
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Creator>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
