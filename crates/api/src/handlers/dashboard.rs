//! Handlers for the dashboard widgets.
//!
//! Each widget fetches the lists it needs through the data store and joins
//! them in memory, the same shape as the SPA's original page loads. All
//! endpoints require authentication via [`AuthUser`].

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use mqhub_core::types::{DbId, Timestamp};
use mqhub_core::{insights, progress, status};
use mqhub_db::models::activity::ActivityEntry;
use mqhub_db::models::calendar::CalendarEvent;
use mqhub_db::models::project::ProjectFilter;
use mqhub_db::models::task::TaskFilter;
use mqhub_db::models::ticket::TicketFilter;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Widget response types
// ---------------------------------------------------------------------------

/// A single project row for the progress widget.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ProjectProgressItem {
    pub project_id: DbId,
    pub name: String,
    pub status: String,
    pub status_color: String,
    pub tasks_done: i64,
    pub tasks_total: i64,
    pub completion_pct: f64,
}

/// A single project row for the stalled-projects widget.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct StalledProjectItem {
    pub project_id: DbId,
    pub name: String,
    pub owner_id: Option<DbId>,
    /// Most recent task update in the project, or the project's own
    /// `updated_at` when it has no tasks.
    pub last_activity: Timestamp,
    pub days_quiet: i64,
}

/// A single task row for the blocked-tasks widget.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct BlockedTaskItem {
    pub task_id: DbId,
    pub title: String,
    pub project_id: DbId,
    pub project_name: Option<String>,
    pub assignee_id: Option<DbId>,
    pub blocked_reason: Option<String>,
    /// When the task last changed, which for a blocked task is when it
    /// entered the blocked status.
    pub since: Timestamp,
}

/// Per-department open-ticket count for the tickets widget.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct OpenTicketsItem {
    /// `None` groups tickets not routed to any department.
    pub department_id: Option<DbId>,
    pub department_name: Option<String>,
    pub open_count: i64,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboard/stalled-projects`.
#[derive(Debug, Deserialize)]
pub struct StalledQuery {
    /// Days without task activity before an active project counts as
    /// stalled. Defaults to 14.
    pub days: Option<i64>,
}

/// Query params for `GET /dashboard/upcoming-events`.
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    /// Maximum entries to return. Defaults to 5, capped at 50.
    pub limit: Option<i64>,
}

/// Query params for `GET /dashboard/activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum entries to return. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    /// Offset for pagination. Defaults to 0.
    pub offset: Option<i64>,
}

/// Default entries for the upcoming-events widget.
const UPCOMING_DEFAULT_LIMIT: i64 = 5;
/// Maximum entries for the upcoming-events widget.
const UPCOMING_MAX_LIMIT: i64 = 50;

/// Default entries per activity page.
const ACTIVITY_DEFAULT_LIMIT: i64 = 20;
/// Maximum entries per activity page.
const ACTIVITY_MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Project progress widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/project-progress
///
/// Per-project task completion percentage plus the status display color.
pub async fn project_progress(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<ProjectProgressItem>>> {
    let project_filter = ProjectFilter::default();
    let task_filter = TaskFilter::default();
    let (projects, tasks) = tokio::try_join!(
        state.store.list_projects(&project_filter),
        state.store.list_tasks(&task_filter),
    )?;

    let items = projects
        .into_iter()
        .map(|p| {
            let total = tasks.iter().filter(|t| t.project_id == p.id).count();
            let done = tasks
                .iter()
                .filter(|t| t.project_id == p.id && t.status == status::task::DONE)
                .count();
            ProjectProgressItem {
                project_id: p.id,
                name: p.name,
                status_color: status::project::color(&p.status).to_string(),
                status: p.status,
                tasks_done: done as i64,
                tasks_total: total as i64,
                completion_pct: progress::completion_pct(done, total),
            }
        })
        .collect();

    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Stalled projects widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/stalled-projects
///
/// Active projects whose tasks have not moved for `days` days.
pub async fn stalled_projects(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<StalledQuery>,
) -> AppResult<Json<Vec<StalledProjectItem>>> {
    let days = query
        .days
        .unwrap_or(insights::DEFAULT_STALL_THRESHOLD_DAYS);
    let now = Utc::now();

    let project_filter = ProjectFilter::default();
    let task_filter = TaskFilter::default();
    let (projects, tasks) = tokio::try_join!(
        state.store.list_projects(&project_filter),
        state.store.list_tasks(&task_filter),
    )?;

    let items = projects
        .into_iter()
        .filter_map(|p| {
            let last_activity = tasks
                .iter()
                .filter(|t| t.project_id == p.id)
                .map(|t| t.updated_at)
                .max()
                .unwrap_or(p.updated_at);
            if !insights::is_stalled(&p.status, last_activity, now, days) {
                return None;
            }
            Some(StalledProjectItem {
                project_id: p.id,
                name: p.name,
                owner_id: p.owner_id,
                last_activity,
                days_quiet: (now - last_activity).num_days(),
            })
        })
        .collect();

    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Blocked tasks widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/blocked-tasks
///
/// Every blocked task across all projects, with the project name joined in.
pub async fn blocked_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<BlockedTaskItem>>> {
    let project_filter = ProjectFilter::default();
    let task_filter = TaskFilter::default();
    let (projects, tasks) = tokio::try_join!(
        state.store.list_projects(&project_filter),
        state.store.list_tasks(&task_filter),
    )?;

    let names: HashMap<DbId, String> = projects.into_iter().map(|p| (p.id, p.name)).collect();

    let items = tasks
        .into_iter()
        .filter(|t| insights::is_blocked(&t.status))
        .map(|t| BlockedTaskItem {
            task_id: t.id,
            title: t.title,
            project_name: names.get(&t.project_id).cloned(),
            project_id: t.project_id,
            assignee_id: t.assignee_id,
            blocked_reason: t.blocked_reason,
            since: t.updated_at,
        })
        .collect();

    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Open tickets widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/open-tickets
///
/// Open and in-progress ticket counts per department, busiest first.
/// Departments without open tickets are omitted.
pub async fn open_tickets(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<OpenTicketsItem>>> {
    let ticket_filter = TicketFilter::default();
    let (departments, tickets) = tokio::try_join!(
        state.store.list_departments(),
        state.store.list_tickets(&ticket_filter),
    )?;

    let mut counts: HashMap<Option<DbId>, i64> = HashMap::new();
    for ticket in &tickets {
        if status::is_known(status::ticket::OPEN_SET, &ticket.status) {
            *counts.entry(ticket.department_id).or_insert(0) += 1;
        }
    }

    let names: HashMap<DbId, String> = departments.into_iter().map(|d| (d.id, d.name)).collect();

    let mut items: Vec<OpenTicketsItem> = counts
        .into_iter()
        .map(|(department_id, open_count)| OpenTicketsItem {
            department_id,
            department_name: department_id.and_then(|id| names.get(&id).cloned()),
            open_count,
        })
        .collect();
    items.sort_by(|a, b| {
        b.open_count
            .cmp(&a.open_count)
            .then_with(|| a.department_id.cmp(&b.department_id))
    });

    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// Upcoming events widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/upcoming-events
///
/// The next calendar entries ending today or later, soonest first.
pub async fn upcoming_events(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let limit = query
        .limit
        .unwrap_or(UPCOMING_DEFAULT_LIMIT)
        .clamp(1, UPCOMING_MAX_LIMIT);
    let today = Utc::now().date_naive();

    let events = state.store.upcoming_calendar_events(today, limit).await?;
    Ok(Json(events))
}

// ---------------------------------------------------------------------------
// Activity feed widget
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/activity
///
/// Recent activity entries, newest first, with limit/offset paging.
pub async fn activity(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityEntry>>> {
    let limit = query
        .limit
        .unwrap_or(ACTIVITY_DEFAULT_LIMIT)
        .clamp(1, ACTIVITY_MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let entries = state.store.recent_activity(limit, offset).await?;
    Ok(Json(entries))
}
