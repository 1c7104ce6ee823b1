//! Repository for the `activity_log` table.

use sqlx::PgPool;

use crate::models::activity::{ActivityEntry, NewActivityEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, actor_user_id, payload, created_at";

/// Append/read operations for the activity log. Rows are never updated
/// or deleted.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry, returning the created row.
    pub async fn append(
        pool: &PgPool,
        input: &NewActivityEntry,
    ) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_log (event_type, source_entity_type, source_entity_id, \
                                       actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(&input.event_type)
            .bind(&input.source_entity_type)
            .bind(input.source_entity_id)
            .bind(input.actor_user_id)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// List recent entries newest-first with limit/offset paging.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
