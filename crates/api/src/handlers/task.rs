//! Handlers for the `/tasks` resource.
//!
//! Tasks list and create nested under projects
//! (`/projects/{project_id}/tasks`); get/update/delete live at the
//! top-level `/tasks/{id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_core::validation::normalize_tags;
use mqhub_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/tasks?status=&assignee_id=&priority=
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(mut filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<Task>>> {
    filter.project_id = Some(project_id);
    let tasks = state.store.list_tasks(&filter).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/projects/{project_id}/tasks
///
/// Overrides `input.project_id` with the value from the URL path so the
/// task lands under the right project.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(mut input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.project_id = project_id;
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let task = state.store.create_task(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("task", task.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "title": task.title, "project_id": task.project_id })),
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let tasks = state.store.search_tasks(q).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = state
        .store
        .find_task(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let task = state
        .store
        .update_task(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("task", id, action).with_actor(user.user_id));

    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_task(id).await?;
    if deleted {
        state
            .event_bus
            .publish(PlatformEvent::entity_change("task", id, "deleted").with_actor(user.user_id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
