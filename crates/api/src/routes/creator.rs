//! Route definitions for the `/ugc` resource (creator roster).

use axum::routing::get;
use axum::Router;

use crate::handlers::creator;
use crate::state::AppState;

/// Routes mounted at `/ugc`.
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
        .route("/", get(creator::list).post(creator::create))
        .route("/search", get(creator::search))
        .route(
            "/{id}",
            get(creator::get_by_id)
                .put(creator::update)
                .delete(creator::delete),
        )
}
