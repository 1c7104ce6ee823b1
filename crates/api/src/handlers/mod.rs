//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the `DataStore` behind `AppState`, map errors
//! via `AppError`, and publish platform events after successful
//! mutations.

pub mod admin;
pub mod asset;
pub mod auth;
pub mod calendar;
pub mod campaign;
pub mod catalog;
pub mod collection;
pub mod creator;
pub mod dashboard;
pub mod department;
pub mod me;
pub mod project;
pub mod task;
pub mod ticket;
pub mod timeline;

/// Query parameter for the per-resource `/search` endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
