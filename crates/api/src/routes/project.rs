//! Route definitions for the `/projects` resource.
//!
//! Also nests task list/create under `/projects/{project_id}/tasks`;
//! the flat per-task routes live under `/tasks`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /search                  -> search
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
///
/// GET    /{project_id}/tasks      -> list_by_project
/// POST   /{project_id}/tasks      -> create
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new().route("/", get(task::list_by_project).post(task::create));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/search", get(project::search))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/tasks", task_routes)
}
