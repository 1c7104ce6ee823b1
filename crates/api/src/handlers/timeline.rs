//! Handlers for the `/timeline` Gantt endpoints.
//!
//! Each row carries its bar's horizontal placement as percentages of the
//! requested window so the SPA can render `left`/`width` directly. Items
//! without dates or entirely outside the window are omitted.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use mqhub_core::types::{Date, DbId};
use mqhub_core::{status, timeline};
use mqhub_db::models::calendar::CalendarFilter;
use mqhub_db::models::project::ProjectFilter;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query params for the timeline endpoints: an inclusive date window.
/// Both bounds are required.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub from: Date,
    pub to: Date,
}

/// One Gantt bar for the projects timeline.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ProjectTimelineRow {
    pub project_id: DbId,
    pub name: String,
    pub status: String,
    pub color: String,
    pub start_date: Date,
    pub end_date: Date,
    pub offset_pct: f64,
    pub width_pct: f64,
}

/// One bar for the calendar timeline.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct CalendarTimelineRow {
    pub event_id: DbId,
    pub title: String,
    pub event_type: String,
    pub color: String,
    pub start_date: Date,
    pub end_date: Date,
    pub offset_pct: f64,
    pub width_pct: f64,
}

/// GET /api/v1/timeline/projects?from=&to=
///
/// Gantt rows for projects with both dates set, clamped to the window.
pub async fn projects(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(window): Query<WindowQuery>,
) -> AppResult<Json<Vec<ProjectTimelineRow>>> {
    if window.from > window.to {
        return Err(AppError::BadRequest("'from' must not be after 'to'".into()));
    }

    let projects = state.store.list_projects(&ProjectFilter::default()).await?;

    let rows = projects
        .into_iter()
        .filter_map(|p| {
            let (start, end) = (p.start_date?, p.end_date?);
            let pos = timeline::span_position(window.from, window.to, start, end)?;
            Some(ProjectTimelineRow {
                project_id: p.id,
                name: p.name,
                color: status::project::color(&p.status).to_string(),
                status: p.status,
                start_date: start,
                end_date: end,
                offset_pct: pos.offset_pct,
                width_pct: pos.width_pct,
            })
        })
        .collect();

    Ok(Json(rows))
}

/// GET /api/v1/timeline/calendar?from=&to=
///
/// Gantt rows for calendar entries overlapping the window.
pub async fn calendar(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(window): Query<WindowQuery>,
) -> AppResult<Json<Vec<CalendarTimelineRow>>> {
    if window.from > window.to {
        return Err(AppError::BadRequest("'from' must not be after 'to'".into()));
    }

    let filter = CalendarFilter {
        from: Some(window.from),
        to: Some(window.to),
        event_type: None,
    };
    let events = state.store.list_calendar_events(&filter).await?;

    let rows = events
        .into_iter()
        .filter_map(|e| {
            let pos = timeline::span_position(window.from, window.to, e.start_date, e.end_date)?;
            Some(CalendarTimelineRow {
                event_id: e.id,
                title: e.title,
                color: status::event_type::color(&e.event_type).to_string(),
                event_type: e.event_type,
                start_date: e.start_date,
                end_date: e.end_date,
                offset_pct: pos.offset_pct,
                width_pct: pos.width_pct,
            })
        })
        .collect();

    Ok(Json(rows))
}
