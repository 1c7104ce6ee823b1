//! Mar Quente Hub event bus and activity feed plumbing.
//!
//! Building blocks for the in-process event system:
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the canonical domain event envelope.
//! - [`ActivityWriter`]: background service that records every event in
//!   the `activity_log` feed.

pub mod activity;
pub mod bus;

pub use activity::ActivityWriter;
pub use bus::{EventBus, PlatformEvent};
