use std::sync::Arc;

use mqhub_db::store::DataStore;
use mqhub_events::EventBus;
use mqhub_storage::FileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Handlers
/// reach persistence only through the [`DataStore`] trait object, so
/// the same routing tree serves both the Postgres and the in-memory
/// backend.
#[derive(Clone)]
pub struct AppState {
    /// Data-access layer (Postgres or in-memory, chosen at startup).
    pub store: Arc<dyn DataStore>,
    /// File storage for marketing assets (local disk or S3).
    pub files: Arc<dyn FileStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
}
