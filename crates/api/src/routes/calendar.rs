//! Route definitions for the `/calendar` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
///
/// ```text
/// GET    /         -> list (?from=&to=&event_type=)
/// POST   /         -> create
/// GET    /search   -> search
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar::list).post(calendar::create))
        .route("/search", get(calendar::search))
        .route(
            "/{id}",
            get(calendar::get_by_id)
                .put(calendar::update)
                .delete(calendar::delete),
        )
}
