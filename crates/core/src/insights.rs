//! Stalled-project and blocked-task detection.
//!
//! Both are single boolean filters over already-fetched rows; the dashboard
//! handlers apply them to lists loaded through the data store.

use chrono::Duration;

use crate::status;
use crate::types::Timestamp;

/// Default number of days without task activity before an active project
/// counts as stalled.
pub const DEFAULT_STALL_THRESHOLD_DAYS: i64 = 14;

/// Whether an active project has gone quiet.
///
/// `last_activity` is the most recent task update inside the project, falling
/// back to the project's own `updated_at` when it has no tasks. Projects not
/// in the `active` status are never stalled; on-hold and finished projects
/// are expected to be quiet.
pub fn is_stalled(
    project_status: &str,
    last_activity: Timestamp,
    now: Timestamp,
    threshold_days: i64,
) -> bool {
    if project_status != status::project::ACTIVE {
        return false;
    }
    now - last_activity >= Duration::days(threshold_days)
}

/// Whether a task is blocked.
pub fn is_blocked(task_status: &str) -> bool {
    task_status == status::task::BLOCKED
}
