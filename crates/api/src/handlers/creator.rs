//! Handlers for the `/ugc` resource (influencer / creator roster).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_core::validation::{normalize_handle, normalize_tags};
use mqhub_db::models::creator::{CreateCreator, Creator, CreatorFilter, UpdateCreator};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/ugc?status=&platform=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<CreatorFilter>,
) -> AppResult<Json<Vec<Creator>>> {
    let creators = state.store.list_creators(&filter).await?;
    Ok(Json(creators))
}

/// GET /api/v1/ugc/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Creator>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let creators = state.store.search_creators(q).await?;
    Ok(Json(creators))
}

/// POST /api/v1/ugc
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateCreator>,
) -> AppResult<(StatusCode, Json<Creator>)> {
    input.validate()?;
    input.handle = normalize_handle(&input.handle);
    input.tags = input.tags.as_deref().map(normalize_tags);
    let creator = state.store.create_creator(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("creator", creator.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "name": creator.name })),
    );

    Ok((StatusCode::CREATED, Json(creator)))
}

/// GET /api/v1/ugc/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Creator>> {
    let creator = state
        .store
        .find_creator(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Creator",
            id,
        }))?;
    Ok(Json(creator))
}

/// PUT /api/v1/ugc/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCreator>,
) -> AppResult<Json<Creator>> {
    input.validate()?;
    input.handle = input.handle.as_deref().map(normalize_handle);
    input.tags = input.tags.as_deref().map(normalize_tags);
    let creator = state
        .store
        .update_creator(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Creator",
            id,
        }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("creator", id, action).with_actor(user.user_id));

    Ok(Json(creator))
}

/// DELETE /api/v1/ugc/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_creator(id).await?;
    if deleted {
        state.event_bus.publish(
            PlatformEvent::entity_change("creator", id, "deleted").with_actor(user.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Creator",
            id,
        }))
    }
}
