//! Handlers for the `/calendar` resource (launch calendar).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_db::models::calendar::{
    CalendarEvent, CalendarFilter, CreateCalendarEvent, UpdateCalendarEvent,
};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/calendar?from=&to=&event_type=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<CalendarFilter>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.store.list_calendar_events(&filter).await?;
    Ok(Json(events))
}

/// GET /api/v1/calendar/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let events = state.store.search_calendar_events(q).await?;
    Ok(Json(events))
}

/// POST /api/v1/calendar
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCalendarEvent>,
) -> AppResult<(StatusCode, Json<CalendarEvent>)> {
    input.validate()?;
    let event = state.store.create_calendar_event(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("calendar_event", event.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "title": event.title })),
    );

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/calendar/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CalendarEvent>> {
    let event = state
        .store
        .find_calendar_event(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CalendarEvent",
            id,
        }))?;
    Ok(Json(event))
}

/// PUT /api/v1/calendar/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCalendarEvent>,
) -> AppResult<Json<CalendarEvent>> {
    input.validate()?;
    let event = state
        .store
        .update_calendar_event(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CalendarEvent",
            id,
        }))?;

    state.event_bus.publish(
        PlatformEvent::entity_change("calendar_event", id, "updated").with_actor(user.user_id),
    );

    Ok(Json(event))
}

/// DELETE /api/v1/calendar/{id}
///
/// Calendar entries are removed outright; there is no `deleted_at` column.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_calendar_event(id).await?;
    if deleted {
        state.event_bus.publish(
            PlatformEvent::entity_change("calendar_event", id, "deleted").with_actor(user.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "CalendarEvent",
            id,
        }))
    }
}
