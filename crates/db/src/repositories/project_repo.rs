//! Repository for the `projects` table.

use sqlx::PgPool;

use mqhub_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, owner_id, department_id, \
                        start_date, end_date, tags, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status` is `None`, defaults to `planning`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, status, owner_id, department_id, \
                                   start_date, end_date, tags)
             VALUES ($1, $2, COALESCE($3, 'planning'), $4, $5, $6, $7, COALESCE($8, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.owner_id)
            .bind(input.department_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects with optional status/owner/department filters,
    /// newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["deleted_at IS NULL".into()];
        let mut param_idx: usize = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.owner_id.is_some() {
            conditions.push(format!("owner_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.department_id.is_some() {
            conditions.push(format!("department_id = ${param_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Project>(&query);
        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(owner_id) = filter.owner_id {
            q = q.bind(owner_id);
        }
        if let Some(department_id) = filter.department_id {
            q = q.bind(department_id);
        }
        q.fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                owner_id = COALESCE($5, owner_id),
                department_id = COALESCE($6, department_id),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                tags = COALESCE($9, tags),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.owner_id)
            .bind(input.department_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over project names, newest first.
    pub async fn search(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL AND name ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
