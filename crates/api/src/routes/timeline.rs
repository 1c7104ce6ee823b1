//! Route definitions for the `/timeline` Gantt endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::timeline;
use crate::state::AppState;

/// Routes mounted at `/timeline`.
///
/// ```text
/// GET /projects   -> projects (?from=&to=)
/// GET /calendar   -> calendar (?from=&to=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(timeline::projects))
        .route("/calendar", get(timeline::calendar))
}
