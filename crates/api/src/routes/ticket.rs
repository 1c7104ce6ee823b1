//! Route definitions for the `/tickets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// GET    /search   -> search
/// GET    /{id}     -> get_by_id
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ticket::list).post(ticket::create))
        .route("/search", get(ticket::search))
        .route(
            "/{id}",
            get(ticket::get_by_id)
                .put(ticket::update)
                .delete(ticket::delete),
        )
}
