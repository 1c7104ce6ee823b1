//! Handler for the status-catalog endpoint.
//!
//! Serves the per-entity status catalogs with their display colors so the
//! SPA renders badges from one source instead of duplicating the mapping
//! client-side.

use axum::Json;
use serde::Serialize;
use ts_rs::TS;

use mqhub_core::status;

use crate::middleware::auth::AuthUser;

/// One catalog entry: a status value and its display color.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub value: String,
    pub color: String,
}

/// Every status catalog the UI renders badges for.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct StatusCatalogs {
    pub projects: Vec<CatalogEntry>,
    pub tasks: Vec<CatalogEntry>,
    pub tickets: Vec<CatalogEntry>,
    pub priorities: Vec<CatalogEntry>,
    pub collections: Vec<CatalogEntry>,
    pub creators: Vec<CatalogEntry>,
    /// Platforms carry no color; the UI shows an icon instead.
    pub platforms: Vec<String>,
    pub campaigns: Vec<CatalogEntry>,
    pub event_types: Vec<CatalogEntry>,
}

fn entries(values: &[&str], color: fn(&str) -> &'static str) -> Vec<CatalogEntry> {
    values
        .iter()
        .map(|v| CatalogEntry {
            value: (*v).to_string(),
            color: color(v).to_string(),
        })
        .collect()
}

/// GET /api/v1/statuses
///
/// The full set of status catalogs with display colors. Static per build;
/// the SPA fetches it once at startup.
pub async fn statuses(_user: AuthUser) -> Json<StatusCatalogs> {
    Json(StatusCatalogs {
        projects: entries(status::project::ALL, status::project::color),
        tasks: entries(status::task::ALL, status::task::color),
        tickets: entries(status::ticket::ALL, status::ticket::color),
        priorities: entries(status::priority::ALL, status::priority::color),
        collections: entries(status::collection::ALL, status::collection::color),
        creators: entries(status::creator::ALL, status::creator::color),
        platforms: status::platform::ALL
            .iter()
            .map(|p| (*p).to_string())
            .collect(),
        campaigns: entries(status::campaign::ALL, status::campaign::color),
        event_types: entries(status::event_type::ALL, status::event_type::color),
    })
}
