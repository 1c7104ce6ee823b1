//! Repository for the `collections` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::collection::{Collection, CollectionFilter, CreateCollection, UpdateCollection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, season, description, status, launch_date, piece_count, \
                        tags, created_at, updated_at";

/// Provides CRUD operations for collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new collection, returning the created row.
    ///
    /// If `status` is `None`, defaults to `concept`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (name, season, description, status, launch_date, \
                                      piece_count, tags)
             VALUES ($1, $2, $3, COALESCE($4, 'concept'), $5, $6, COALESCE($7, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(&input.name)
            .bind(&input.season)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.launch_date)
            .bind(input.piece_count)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a collection by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM collections WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List collections with optional status/season filters, newest first.
    /// Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &CollectionFilter,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.season.is_some() {
            conditions.push(format!("season = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM collections WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Collection>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(season) = &filter.season {
            q = q.bind(season);
        }
        q.fetch_all(pool).await
    }

    /// Update a collection. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET
                name = COALESCE($2, name),
                season = COALESCE($3, season),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                launch_date = COALESCE($6, launch_date),
                piece_count = COALESCE($7, piece_count),
                tags = COALESCE($8, tags),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.season)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.launch_date)
            .bind(input.piece_count)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a collection. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE collections SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over collection names, newest first.
    pub async fn search(
        pool: &PgPool,
        q: &str,
        limit: i64,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE deleted_at IS NULL AND name ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
