//! Handlers for the `/departments` resource.
//!
//! Departments have no soft delete; DELETE removes the row and
//! referencing projects and tickets go department-less via the FK.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.store.list_departments().await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Department>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let departments = state.store.search_departments(q).await?;
    Ok(Json(departments))
}

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    input.validate()?;
    let department = state.store.create_department(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("department", department.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "name": department.name })),
    );

    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department =
        state
            .store
            .find_department(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id,
            }))?;
    Ok(Json(department))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    input.validate()?;
    let department = state
        .store
        .update_department(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    state.event_bus.publish(
        PlatformEvent::entity_change("department", id, "updated").with_actor(user.user_id),
    );

    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_department(id).await?;
    if deleted {
        state.event_bus.publish(
            PlatformEvent::entity_change("department", id, "deleted").with_actor(user.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))
    }
}
