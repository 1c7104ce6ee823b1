//! Repository for the `calendar_events` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::calendar::{
    CalendarEvent, CalendarFilter, CreateCalendarEvent, UpdateCalendarEvent,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, event_type, start_date, end_date, \
                        collection_id, campaign_id, attendees, location, created_at, updated_at";

/// Provides CRUD operations for launch-calendar entries.
///
/// Calendar rows are hard-deleted; a removed entry has no history value.
pub struct CalendarRepo;

impl CalendarRepo {
    /// Insert a new calendar entry, returning the created row.
    ///
    /// If `event_type` is `None`, defaults to `meeting`; `end_date`
    /// defaults to `start_date`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCalendarEvent,
    ) -> Result<CalendarEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_events (title, description, event_type, start_date, end_date, \
                                          collection_id, campaign_id, attendees, location)
             VALUES ($1, $2, COALESCE($3, 'meeting'), $4, COALESCE($5, $4), $6, $7, \
                     COALESCE($8, '{{}}'), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.collection_id)
            .bind(input.campaign_id)
            .bind(&input.attendees)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a calendar entry by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendar_events WHERE id = $1");
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List calendar entries ordered by start date ascending.
    ///
    /// `from`/`to` select entries whose `[start_date, end_date]` span
    /// overlaps the window; either bound may be open.
    pub async fn list(
        pool: &PgPool,
        filter: &CalendarFilter,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.from.is_some() {
            conditions.push(format!("end_date >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.to.is_some() {
            conditions.push(format!("start_date <= ${param_idx}"));
            param_idx += 1;
        }
        if filter.event_type.is_some() {
            conditions.push(format!("event_type = ${param_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events {where_clause} \
             ORDER BY start_date ASC, id ASC"
        );

        let mut q = sqlx::query_as::<_, CalendarEvent>(&query);
        if let Some(from) = filter.from {
            q = q.bind(from);
        }
        if let Some(to) = filter.to {
            q = q.bind(to);
        }
        if let Some(event_type) = &filter.event_type {
            q = q.bind(event_type);
        }
        q.fetch_all(pool).await
    }

    /// Update a calendar entry. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_type = COALESCE($4, event_type),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                collection_id = COALESCE($7, collection_id),
                campaign_id = COALESCE($8, campaign_id),
                attendees = COALESCE($9, attendees),
                location = COALESCE($10, location),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.event_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.collection_id)
            .bind(input.campaign_id)
            .bind(&input.attendees)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a calendar entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over entry titles, soonest first.
    pub async fn search(
        pool: &PgPool,
        q: &str,
        limit: i64,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events
             WHERE title ILIKE $1
             ORDER BY start_date ASC, id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List the next entries ending on or after `today`, soonest first,
    /// so multi-day entries still in progress are included.
    pub async fn upcoming(
        pool: &PgPool,
        today: chrono::NaiveDate,
        limit: i64,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events
             WHERE end_date >= $1
             ORDER BY start_date ASC, id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(today)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
