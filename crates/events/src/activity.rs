//! Activity feed writer.
//!
//! [`ActivityWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and records every received [`PlatformEvent`] in the
//! activity log through the [`DataStore`], so the feed works the same
//! against Postgres and the in-memory store. It runs as a long-lived
//! background task and shuts down when the bus sender is dropped.

use std::sync::Arc;

use tokio::sync::broadcast;

use mqhub_db::models::activity::{ActivityEntry, NewActivityEntry};
use mqhub_db::store::{DataStore, StoreError};

use crate::bus::PlatformEvent;

/// Background service that persists platform events to the activity log.
pub struct ActivityWriter;

impl ActivityWriter {
    /// Run the persistence loop.
    ///
    /// Subscribes to the event bus via the provided `receiver` and records
    /// every event it receives. The loop exits when the channel is closed
    /// (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(store: Arc<dyn DataStore>, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::record(store.as_ref(), &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to record activity entry"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Activity writer lagged, some events were not recorded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity writer shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the activity log.
    async fn record(
        store: &dyn DataStore,
        event: &PlatformEvent,
    ) -> Result<ActivityEntry, StoreError> {
        store
            .append_activity(&NewActivityEntry {
                event_type: event.event_type.clone(),
                source_entity_type: event.source_entity_type.clone(),
                source_entity_id: event.source_entity_id,
                actor_user_id: event.actor_user_id,
                payload: event.payload.clone(),
            })
            .await
    }
}
