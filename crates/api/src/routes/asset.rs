//! Route definitions for the `/assets` resource and the public `/files`
//! download routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::asset;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /                    -> list
/// POST   /upload              -> upload (multipart)
/// GET    /search              -> search
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/download-url   -> download_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(asset::list))
        .route("/upload", post(asset::upload))
        .route("/search", get(asset::search))
        .route(
            "/{id}",
            get(asset::get_by_id)
                .put(asset::update)
                .delete(asset::delete),
        )
        .route("/{id}/download-url", get(asset::download_url))
}

/// Public download routes mounted at `/files`.
///
/// No auth extractor here: the signed token is the credential.
///
/// ```text
/// GET /{token}   -> download
/// ```
pub fn files_router() -> Router<AppState> {
    Router::new().route("/{token}", get(asset::download))
}
