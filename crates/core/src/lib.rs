//! Domain layer for Mar Quente Hub.
//!
//! Pure types and arithmetic shared by the store, event, and API crates:
//! ids and timestamps, the domain error type, role and status catalogs,
//! and the computed-view helpers (timeline spans, progress percentages,
//! stalled/blocked detection). No I/O and no internal dependencies.

pub mod error;
pub mod insights;
pub mod progress;
pub mod roles;
pub mod status;
pub mod timeline;
pub mod types;
pub mod validation;

pub use error::CoreError;
