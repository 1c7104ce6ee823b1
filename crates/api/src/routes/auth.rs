//! Route definitions for the `/auth` resource.
//!
//! Login and refresh are the only unauthenticated business routes in the
//! API; logout needs a valid access token so it can revoke the caller's
//! own sessions and nobody else's.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login    -> login (public)
/// POST /refresh  -> refresh (public, rotates the refresh token)
/// POST /logout   -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
