//! Launch-calendar entity model and DTOs.
//!
//! Calendar entries are the company-wide schedule: collection launches,
//! product drops, photo shoots, meetings, and deadlines.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{Date, DbId, Timestamp};

/// A calendar row from the `calendar_events` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct CalendarEvent {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// One of `launch`, `drop`, `shoot`, `meeting`, `deadline`.
    pub event_type: String,
    pub start_date: Date,
    /// Inclusive; equals `start_date` for single-day entries.
    pub end_date: Date,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub attendees: Vec<String>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new calendar entry.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateCalendarEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `meeting` if omitted.
    pub event_type: Option<String>,
    pub start_date: Date,
    /// Defaults to `start_date` if omitted.
    pub end_date: Option<Date>,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub attendees: Option<Vec<String>>,
    pub location: Option<String>,
}

/// DTO for updating an existing calendar entry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateCalendarEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub collection_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub attendees: Option<Vec<String>>,
    pub location: Option<String>,
}

/// Optional list filters for calendar entries, bound from query parameters.
///
/// `from`/`to` select entries whose date span overlaps the window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub event_type: Option<String>,
}
