//! Repository for the `tasks` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, assignee_id, \
                        due_date, priority, blocked_reason, tags, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// If `status` is `None`, defaults to `todo`; `priority` defaults to
    /// `normal`.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, status, assignee_id, \
                                due_date, priority, blocked_reason, tags)
             VALUES ($1, $2, $3, COALESCE($4, 'todo'), $5, $6, COALESCE($7, 'normal'), $8, \
                     COALESCE($9, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.assignee_id)
            .bind(input.due_date)
            .bind(&input.priority)
            .bind(&input.blocked_reason)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks with optional project/status/assignee/priority filters,
    /// newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.project_id.is_some() {
            conditions.push(format!("project_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
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
            "SELECT {COLUMNS} FROM tasks WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Task>(&query);
        if let Some(project_id) = filter.project_id {
            q = q.bind(project_id);
        }
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(assignee_id) = filter.assignee_id {
            q = q.bind(assignee_id);
        }
        if let Some(priority) = &filter.priority {
            q = q.bind(priority);
        }
        q.fetch_all(pool).await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                assignee_id = COALESCE($5, assignee_id),
                due_date = COALESCE($6, due_date),
                priority = COALESCE($7, priority),
                blocked_reason = COALESCE($8, blocked_reason),
                tags = COALESCE($9, tags),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.assignee_id)
            .bind(input.due_date)
            .bind(&input.priority)
            .bind(&input.blocked_reason)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a task. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tasks SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over task titles, newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE deleted_at IS NULL AND title ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
