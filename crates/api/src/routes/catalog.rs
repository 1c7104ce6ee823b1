//! Route definition for the status-catalog endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/statuses`.
///
/// ```text
/// GET /   -> statuses (catalogs with display colors)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(catalog::statuses))
}
