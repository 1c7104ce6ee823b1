//! Handlers for the `/tickets` resource (internal requests between teams).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_db::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use mqhub_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tickets?status=&department_id=&assignee_id=&priority=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<TicketFilter>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = state.store.list_tickets(&filter).await?;
    Ok(Json(tickets))
}

/// GET /api/v1/tickets/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Ticket>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let tickets = state.store.search_tickets(q).await?;
    Ok(Json(tickets))
}

/// POST /api/v1/tickets
///
/// The requester defaults to the authenticated user when not given.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    input.validate()?;
    if input.requester_id.is_none() {
        input.requester_id = Some(user.user_id);
    }
    let ticket = state.store.create_ticket(&input).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("ticket", ticket.id, "created")
            .with_actor(user.user_id)
            .with_payload(json!({ "title": ticket.title })),
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ticket>> {
    let ticket = state
        .store
        .find_ticket(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;
    Ok(Json(ticket))
}

/// PUT /api/v1/tickets/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    input.validate()?;
    let ticket = state
        .store
        .update_ticket(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let action = if input.status.is_some() {
        "status_changed"
    } else {
        "updated"
    };
    state
        .event_bus
        .publish(PlatformEvent::entity_change("ticket", id, action).with_actor(user.user_id));

    Ok(Json(ticket))
}

/// DELETE /api/v1/tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_ticket(id).await?;
    if deleted {
        state
            .event_bus
            .publish(PlatformEvent::entity_change("ticket", id, "deleted").with_actor(user.user_id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))
    }
}
