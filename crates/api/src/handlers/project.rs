//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_core::validation::normalize_tags;
use mqhub_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects?status=&owner_id=&department_id=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects(&filter).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let projects = state.store.search_projects(q).await?;
    Ok(Json(projects))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let project = state.store.create_project(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("project", project.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "name": project.name })),
    );

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let project = state
        .store
        .update_project(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("project", id, action).with_actor(user.user_id));

    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_project(id).await?;
    if deleted {
        state
            .event_bus
            .publish(PlatformEvent::entity_change("project", id, "deleted").with_actor(user.user_id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
