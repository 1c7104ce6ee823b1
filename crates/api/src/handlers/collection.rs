//! Handlers for the `/collections` resource (fashion lines).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_core::validation::normalize_tags;
use mqhub_db::models::collection::{
    Collection, CollectionFilter, CreateCollection, UpdateCollection,
};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/collections?status=&season=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<CollectionFilter>,
) -> AppResult<Json<Vec<Collection>>> {
    let collections = state.store.list_collections(&filter).await?;
    Ok(Json(collections))
}

/// GET /api/v1/collections/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Collection>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let collections = state.store.search_collections(q).await?;
    Ok(Json(collections))
}

/// POST /api/v1/collections
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateCollection>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let collection = state.store.create_collection(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("collection", collection.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "name": collection.name })),
    );

    Ok((StatusCode::CREATED, Json(collection)))
}

/// GET /api/v1/collections/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Collection>> {
    let collection = state
        .store
        .find_collection(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))?;
    Ok(Json(collection))
}

/// PUT /api/v1/collections/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCollection>,
) -> AppResult<Json<Collection>> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let collection = state
        .store
        .update_collection(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("collection", id, action).with_actor(user.user_id));

    Ok(Json(collection))
}

/// DELETE /api/v1/collections/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_collection(id).await?;
    if deleted {
        state.event_bus.publish(
            PlatformEvent::entity_change("collection", id, "deleted").with_actor(user.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))
    }
}
