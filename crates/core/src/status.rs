//! Per-entity status catalogs and display-color mapping.
//!
//! Statuses are plain strings stored on the row; writes are not checked
//! against the catalogs and there is no transition guard. The catalogs
//! exist so list views can color rows consistently, with a neutral
//! fallback for anything they do not know.

/// Neutral gray used for any status the catalogs do not know.
pub const NEUTRAL_COLOR: &str = "#9ca3af";

/// Membership test against a catalog slice.
pub fn is_known(catalog: &[&str], status: &str) -> bool {
    catalog.contains(&status)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub mod project {
    pub const PLANNING: &str = "planning";
    pub const ACTIVE: &str = "active";
    pub const ON_HOLD: &str = "on_hold";
    pub const DONE: &str = "done";

    pub const ALL: &[&str] = &[PLANNING, ACTIVE, ON_HOLD, DONE];

    /// Display color for a project status.
    pub fn color(status: &str) -> &'static str {
        match status {
            PLANNING => "#38bdf8",
            ACTIVE => "#22c55e",
            ON_HOLD => "#f59e0b",
            DONE => "#6366f1",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub mod task {
    pub const TODO: &str = "todo";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const REVIEW: &str = "review";
    pub const BLOCKED: &str = "blocked";
    pub const DONE: &str = "done";

    pub const ALL: &[&str] = &[TODO, IN_PROGRESS, REVIEW, BLOCKED, DONE];

    pub fn color(status: &str) -> &'static str {
        match status {
            TODO => "#94a3b8",
            IN_PROGRESS => "#38bdf8",
            REVIEW => "#a855f7",
            BLOCKED => "#ef4444",
            DONE => "#22c55e",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

pub mod ticket {
    pub const OPEN: &str = "open";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const RESOLVED: &str = "resolved";
    pub const CLOSED: &str = "closed";

    pub const ALL: &[&str] = &[OPEN, IN_PROGRESS, RESOLVED, CLOSED];

    /// Statuses that count as "open" for the dashboard widget.
    pub const OPEN_SET: &[&str] = &[OPEN, IN_PROGRESS];

    pub fn color(status: &str) -> &'static str {
        match status {
            OPEN => "#f59e0b",
            IN_PROGRESS => "#38bdf8",
            RESOLVED => "#22c55e",
            CLOSED => "#64748b",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

/// Ticket priorities. Separate from status: both are free strings on the row.
pub mod priority {
    pub const LOW: &str = "low";
    pub const NORMAL: &str = "normal";
    pub const HIGH: &str = "high";
    pub const URGENT: &str = "urgent";

    pub const ALL: &[&str] = &[LOW, NORMAL, HIGH, URGENT];

    pub fn color(priority: &str) -> &'static str {
        match priority {
            LOW => "#94a3b8",
            NORMAL => "#38bdf8",
            HIGH => "#f97316",
            URGENT => "#ef4444",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

pub mod collection {
    pub const CONCEPT: &str = "concept";
    pub const DEVELOPMENT: &str = "development";
    pub const PRODUCTION: &str = "production";
    pub const LAUNCHED: &str = "launched";

    pub const ALL: &[&str] = &[CONCEPT, DEVELOPMENT, PRODUCTION, LAUNCHED];

    pub fn color(status: &str) -> &'static str {
        match status {
            CONCEPT => "#a855f7",
            DEVELOPMENT => "#38bdf8",
            PRODUCTION => "#f59e0b",
            LAUNCHED => "#22c55e",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// UGC creators
// ---------------------------------------------------------------------------

pub mod creator {
    pub const PROSPECT: &str = "prospect";
    pub const CONTACTED: &str = "contacted";
    pub const NEGOTIATING: &str = "negotiating";
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";

    pub const ALL: &[&str] = &[PROSPECT, CONTACTED, NEGOTIATING, ACTIVE, INACTIVE];

    pub fn color(status: &str) -> &'static str {
        match status {
            PROSPECT => "#94a3b8",
            CONTACTED => "#38bdf8",
            NEGOTIATING => "#f59e0b",
            ACTIVE => "#22c55e",
            INACTIVE => "#64748b",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

/// Social platforms a creator publishes on.
pub mod platform {
    pub const INSTAGRAM: &str = "instagram";
    pub const TIKTOK: &str = "tiktok";
    pub const YOUTUBE: &str = "youtube";

    pub const ALL: &[&str] = &[INSTAGRAM, TIKTOK, YOUTUBE];
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

pub mod campaign {
    pub const DRAFT: &str = "draft";
    pub const SCHEDULED: &str = "scheduled";
    pub const RUNNING: &str = "running";
    pub const DONE: &str = "done";

    pub const ALL: &[&str] = &[DRAFT, SCHEDULED, RUNNING, DONE];

    pub fn color(status: &str) -> &'static str {
        match status {
            DRAFT => "#94a3b8",
            SCHEDULED => "#a855f7",
            RUNNING => "#22c55e",
            DONE => "#6366f1",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Launch calendar
// ---------------------------------------------------------------------------

pub mod event_type {
    pub const LAUNCH: &str = "launch";
    pub const DROP: &str = "drop";
    pub const SHOOT: &str = "shoot";
    pub const MEETING: &str = "meeting";
    pub const DEADLINE: &str = "deadline";

    pub const ALL: &[&str] = &[LAUNCH, DROP, SHOOT, MEETING, DEADLINE];

    pub fn color(event_type: &str) -> &'static str {
        match event_type {
            LAUNCH => "#ec4899",
            DROP => "#f97316",
            SHOOT => "#38bdf8",
            MEETING => "#94a3b8",
            DEADLINE => "#ef4444",
            _ => super::NEUTRAL_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_has_specific_color() {
        assert_eq!(project::color(project::ACTIVE), "#22c55e");
        assert_eq!(task::color(task::BLOCKED), "#ef4444");
        assert_eq!(ticket::color(ticket::OPEN), "#f59e0b");
    }

    #[test]
    fn unknown_status_falls_back_to_neutral() {
        assert_eq!(project::color("does-not-exist"), NEUTRAL_COLOR);
        assert_eq!(creator::color(""), NEUTRAL_COLOR);
        assert_eq!(event_type::color("party"), NEUTRAL_COLOR);
    }

    #[test]
    fn catalogs_contain_their_members() {
        for s in project::ALL {
            assert!(is_known(project::ALL, s));
        }
        assert!(!is_known(project::ALL, "archived"));
    }

    #[test]
    fn open_set_is_subset_of_ticket_statuses() {
        for s in ticket::OPEN_SET {
            assert!(is_known(ticket::ALL, s));
        }
    }
}
