//! Route definitions for the current-user `/me` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /          -> get_me
/// PUT /profile   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_me))
        .route("/profile", put(me::update_profile))
}
