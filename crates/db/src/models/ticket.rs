//! Ticket entity model and DTOs.
//!
//! Tickets are internal requests routed to a department (e.g. marketing
//! asks IT for a storefront fix).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{DbId, Timestamp};

/// A ticket row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub department_id: Option<DbId>,
    pub requester_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    /// Free status string from the ticket catalog (`open`, `in_progress`,
    /// `resolved`, `closed`).
    pub status: String,
    pub priority: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateTicket {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub department_id: Option<DbId>,
    pub requester_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
    /// Defaults to `normal` if omitted.
    pub priority: Option<String>,
}

/// DTO for updating an existing ticket. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateTicket {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Optional list filters for tickets, bound from query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub status: Option<String>,
    pub department_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub priority: Option<String>,
}
