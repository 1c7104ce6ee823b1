//! Repository for the `tickets` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, department_id, requester_id, assignee_id, \
                        status, priority, created_at, updated_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// If `status` is `None`, defaults to `open`; `priority` defaults to
    /// `normal`.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (title, description, department_id, requester_id, assignee_id, \
                                  status, priority)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'open'), COALESCE($7, 'normal'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.department_id)
            .bind(input.requester_id)
            .bind(input.assignee_id)
            .bind(&input.status)
            .bind(&input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets with optional status/department/assignee/priority
    /// filters, newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &TicketFilter) -> Result<Vec<Ticket>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.department_id.is_some() {
            conditions.push(format!("department_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.assignee_id.is_some() {
            conditions.push(format!("assignee_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Ticket>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(department_id) = filter.department_id {
            q = q.bind(department_id);
        }
        if let Some(assignee_id) = filter.assignee_id {
            q = q.bind(assignee_id);
        }
        if let Some(priority) = &filter.priority {
            q = q.bind(priority);
        }
        q.fetch_all(pool).await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                department_id = COALESCE($4, department_id),
                assignee_id = COALESCE($5, assignee_id),
                status = COALESCE($6, status),
                priority = COALESCE($7, priority),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.department_id)
            .bind(input.assignee_id)
            .bind(&input.status)
            .bind(&input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a ticket. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tickets SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over ticket titles, newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets
             WHERE deleted_at IS NULL AND title ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
