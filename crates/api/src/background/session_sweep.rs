//! Periodic purge of dead refresh-token sessions.
//!
//! Every login creates a session row and nothing reads a session again
//! once it is revoked or past its expiry, so dead rows accumulate. This
//! task deletes them on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use mqhub_db::store::DataStore;

/// How often the sweep runs unless overridden.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Run the session sweep loop.
///
/// The interval defaults to one hour and can be overridden with
/// `SESSION_SWEEP_INTERVAL_SECS`. Runs until `cancel` is triggered.
pub async fn run(store: Arc<dyn DataStore>, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("SESSION_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Session sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match store.purge_dead_sessions().await {
                    Ok(purged) => {
                        if purged > 0 {
                            tracing::info!(purged, "Session sweep: removed dead sessions");
                        } else {
                            tracing::debug!("Session sweep: nothing to remove");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweep failed");
                    }
                }
            }
        }
    }
}
