//! Route definitions for the dashboard widgets.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Widget data routes mounted at `/dashboard`.
///
/// ```text
/// GET /project-progress   -> project_progress
/// GET /stalled-projects   -> stalled_projects (?days=)
/// GET /blocked-tasks      -> blocked_tasks
/// GET /open-tickets       -> open_tickets
/// GET /upcoming-events    -> upcoming_events (?limit=)
/// GET /activity           -> activity (?limit=&offset=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project-progress", get(dashboard::project_progress))
        .route("/stalled-projects", get(dashboard::stalled_projects))
        .route("/blocked-tasks", get(dashboard::blocked_tasks))
        .route("/open-tickets", get(dashboard::open_tickets))
        .route("/upcoming-events", get(dashboard::upcoming_events))
        .route("/activity", get(dashboard::activity))
}
