//! Handlers for the `/campaigns` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_db::models::campaign::{Campaign, CampaignFilter, CreateCampaign, UpdateCampaign};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/campaigns?status=&collection_id=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<CampaignFilter>,
) -> AppResult<Json<Vec<Campaign>>> {
    let campaigns = state.store.list_campaigns(&filter).await?;
    Ok(Json(campaigns))
}

/// GET /api/v1/campaigns/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Campaign>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let campaigns = state.store.search_campaigns(q).await?;
    Ok(Json(campaigns))
}

/// POST /api/v1/campaigns
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    input.validate()?;
    let campaign = state.store.create_campaign(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("campaign", campaign.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "name": campaign.name })),
    );

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Campaign>> {
    let campaign = state
        .store
        .find_campaign(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    Ok(Json(campaign))
}

/// PUT /api/v1/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<Campaign>> {
    input.validate()?;
    let campaign = state
        .store
        .update_campaign(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("campaign", id, action).with_actor(user.user_id));

    Ok(Json(campaign))
}

/// DELETE /api/v1/campaigns/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_campaign(id).await?;
    if deleted {
        state.event_bus.publish(
            PlatformEvent::entity_change("campaign", id, "deleted").with_actor(user.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id,
        }))
    }
}
