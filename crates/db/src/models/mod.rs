//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `validator` rules)
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A filter struct for list queries where the resource supports one
//!
//! API-facing structs also derive `TS` so the SPA's TypeScript bindings
//! can be generated from the same definitions.

pub mod activity;
pub mod asset;
pub mod calendar;
pub mod campaign;
pub mod collection;
pub mod creator;
pub mod department;
pub mod project;
pub mod role;
pub mod session;
pub mod task;
pub mod ticket;
pub mod user;
