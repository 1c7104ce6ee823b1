//! The swappable data-access layer.
//!
//! [`DataStore`] is the uniform adapter the rest of the workspace
//! programs against: per-entity list/get/create/update/delete/search,
//! the auth namespace, and the activity log. Two implementations exist:
//!
//! - [`PgStore`] delegates to the repositories over a live `PgPool`.
//! - [`MemStore`] keeps everything in process memory for development
//!   and tests.
//!
//! Both present the same visible semantics: partial updates leave `None`
//! fields unchanged, deleted rows disappear from reads, lists come back
//! newest-first (departments by name, calendar by start date), and
//! search is a case-insensitive substring match. Which one backs the
//! process is decided once at startup from [`DataBackend`].

use async_trait::async_trait;
use thiserror::Error;

use mqhub_core::types::{Date, DbId, Timestamp};

use crate::models::activity::{ActivityEntry, NewActivityEntry};
use crate::models::asset::{Asset, AssetFilter, CreateAsset, UpdateAsset};
use crate::models::calendar::{
    CalendarEvent, CalendarFilter, CreateCalendarEvent, UpdateCalendarEvent,
};
use crate::models::campaign::{Campaign, CampaignFilter, CreateCampaign, UpdateCampaign};
use crate::models::collection::{Collection, CollectionFilter, CreateCollection, UpdateCollection};
use crate::models::creator::{CreateCreator, Creator, CreatorFilter, UpdateCreator};
use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::role::Role;
use crate::models::session::{CreateSession, Session};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use crate::models::user::{
    CreateUser, UpdateUser, UpdateUserProfile, User, UserProfile, UserResponse,
};

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

/// Cap applied to every per-entity search.
pub const SEARCH_LIMIT: i64 = 50;

/// Which [`DataStore`] implementation backs the process.
///
/// Parsed from the `DATA_BACKEND` environment variable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for DataBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(DataBackend::Postgres),
            "memory" => Ok(DataBackend::Memory),
            other => Err(format!(
                "unknown data backend '{other}' (expected 'postgres' or 'memory')"
            )),
        }
    }
}

/// Errors surfaced by the data-access layer.
///
/// Missing rows are not errors here; reads and updates return `Option`
/// and the API layer decides what a `None` means.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated (duplicate username, slug, ...).
    #[error("{0}")]
    Conflict(String),

    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// A backend-internal failure outside the database path.
    #[error("{0}")]
    Internal(String),
}

impl From<sqlx::Error> for StoreError {
    /// Classify unique violations (Postgres 23505) as [`StoreError::Conflict`]
    /// so both backends report duplicates the same way.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Uniform data-access interface; see the module docs.
///
/// All mutating entity methods follow the same contract: `create`
/// returns the stored row, `update` applies only `Some` fields and
/// returns `None` for a missing row, `delete` returns `false` for a
/// missing row. Status strings are written as given; there is no
/// transition checking at this layer.
#[async_trait]
pub trait DataStore: Send + Sync {
    // -----------------------------------------------------------------------
    // Users & roles
    // -----------------------------------------------------------------------

    /// Find a user row (including auth columns) by ID.
    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    /// Find a user row by exact username.
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find a user row by exact email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Get the API-facing view of a user (role name + profile joined in).
    async fn get_user(&self, id: DbId) -> StoreResult<Option<UserResponse>>;

    /// List all users, newest first.
    async fn list_users(&self) -> StoreResult<Vec<UserResponse>>;

    /// Create a user together with its profile row.
    ///
    /// If the profile insert fails the user row is removed again (best
    /// effort) and the error is returned, so no half-created account is
    /// left behind.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<UserResponse>;

    /// Partially update a user's auth row.
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<UserResponse>>;

    /// Partially update a user's profile row.
    async fn update_user_profile(
        &self,
        user_id: DbId,
        input: &UpdateUserProfile,
    ) -> StoreResult<Option<UserProfile>>;

    /// Replace a user's password hash. Returns `false` for a missing user.
    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> StoreResult<bool>;

    /// Deactivate a user (`is_active = false`). Returns `false` if the
    /// user was missing or already inactive.
    async fn deactivate_user(&self, id: DbId) -> StoreResult<bool>;

    /// Reset the failure counter, clear any lockout, stamp `last_login_at`.
    async fn record_login_success(&self, id: DbId) -> StoreResult<()>;

    /// Increment the failed-login counter.
    async fn record_login_failure(&self, id: DbId) -> StoreResult<()>;

    /// Lock the account until the given instant.
    async fn lock_user(&self, id: DbId, until: Timestamp) -> StoreResult<()>;

    /// List the seeded roles.
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;

    /// Find a seeded role by name.
    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>>;

    /// Resolve a role ID to its name; `"unknown"` if missing.
    async fn role_name(&self, role_id: DbId) -> StoreResult<String>;

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Store a new refresh-token session.
    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session>;

    /// Find a live (unrevoked, unexpired) session by token hash.
    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>>;

    /// Revoke one session. Returns `false` if it was missing or already
    /// revoked.
    async fn revoke_session(&self, id: DbId) -> StoreResult<bool>;

    /// Revoke every live session of a user. Returns the count revoked.
    async fn revoke_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64>;

    /// Delete expired and revoked sessions. Returns the count removed.
    async fn purge_dead_sessions(&self) -> StoreResult<u64>;

    // -----------------------------------------------------------------------
    // Departments
    // -----------------------------------------------------------------------

    /// List all departments, name ascending.
    async fn list_departments(&self) -> StoreResult<Vec<Department>>;

    async fn find_department(&self, id: DbId) -> StoreResult<Option<Department>>;

    async fn create_department(&self, input: &CreateDepartment) -> StoreResult<Department>;

    async fn update_department(
        &self,
        id: DbId,
        input: &UpdateDepartment,
    ) -> StoreResult<Option<Department>>;

    async fn delete_department(&self, id: DbId) -> StoreResult<bool>;

    async fn search_departments(&self, q: &str) -> StoreResult<Vec<Department>>;

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>>;

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project>;

    async fn update_project(&self, id: DbId, input: &UpdateProject)
        -> StoreResult<Option<Project>>;

    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    async fn search_projects(&self, q: &str) -> StoreResult<Vec<Project>>;

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>>;

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task>;

    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>>;

    async fn delete_task(&self, id: DbId) -> StoreResult<bool>;

    async fn search_tasks(&self, q: &str) -> StoreResult<Vec<Task>>;

    // -----------------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------------

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>>;

    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>>;

    async fn create_ticket(&self, input: &CreateTicket) -> StoreResult<Ticket>;

    async fn update_ticket(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>>;

    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool>;

    async fn search_tickets(&self, q: &str) -> StoreResult<Vec<Ticket>>;

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    async fn list_collections(&self, filter: &CollectionFilter) -> StoreResult<Vec<Collection>>;

    async fn find_collection(&self, id: DbId) -> StoreResult<Option<Collection>>;

    async fn create_collection(&self, input: &CreateCollection) -> StoreResult<Collection>;

    async fn update_collection(
        &self,
        id: DbId,
        input: &UpdateCollection,
    ) -> StoreResult<Option<Collection>>;

    async fn delete_collection(&self, id: DbId) -> StoreResult<bool>;

    async fn search_collections(&self, q: &str) -> StoreResult<Vec<Collection>>;

    // -----------------------------------------------------------------------
    // UGC creators
    // -----------------------------------------------------------------------

    async fn list_creators(&self, filter: &CreatorFilter) -> StoreResult<Vec<Creator>>;

    async fn find_creator(&self, id: DbId) -> StoreResult<Option<Creator>>;

    async fn create_creator(&self, input: &CreateCreator) -> StoreResult<Creator>;

    async fn update_creator(&self, id: DbId, input: &UpdateCreator)
        -> StoreResult<Option<Creator>>;

    async fn delete_creator(&self, id: DbId) -> StoreResult<bool>;

    /// Substring match over creator names and handles.
    async fn search_creators(&self, q: &str) -> StoreResult<Vec<Creator>>;

    // -----------------------------------------------------------------------
    // Campaigns
    // -----------------------------------------------------------------------

    async fn list_campaigns(&self, filter: &CampaignFilter) -> StoreResult<Vec<Campaign>>;

    async fn find_campaign(&self, id: DbId) -> StoreResult<Option<Campaign>>;

    async fn create_campaign(&self, input: &CreateCampaign) -> StoreResult<Campaign>;

    async fn update_campaign(
        &self,
        id: DbId,
        input: &UpdateCampaign,
    ) -> StoreResult<Option<Campaign>>;

    async fn delete_campaign(&self, id: DbId) -> StoreResult<bool>;

    async fn search_campaigns(&self, q: &str) -> StoreResult<Vec<Campaign>>;

    // -----------------------------------------------------------------------
    // Launch calendar
    // -----------------------------------------------------------------------

    /// List calendar entries whose span overlaps the filter window,
    /// start date ascending.
    async fn list_calendar_events(&self, filter: &CalendarFilter)
        -> StoreResult<Vec<CalendarEvent>>;

    async fn find_calendar_event(&self, id: DbId) -> StoreResult<Option<CalendarEvent>>;

    async fn create_calendar_event(
        &self,
        input: &CreateCalendarEvent,
    ) -> StoreResult<CalendarEvent>;

    async fn update_calendar_event(
        &self,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> StoreResult<Option<CalendarEvent>>;

    async fn delete_calendar_event(&self, id: DbId) -> StoreResult<bool>;

    async fn search_calendar_events(&self, q: &str) -> StoreResult<Vec<CalendarEvent>>;

    /// The next entries ending on or after `today`, soonest first.
    async fn upcoming_calendar_events(
        &self,
        today: Date,
        limit: i64,
    ) -> StoreResult<Vec<CalendarEvent>>;

    // -----------------------------------------------------------------------
    // Assets
    // -----------------------------------------------------------------------

    async fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>>;

    async fn find_asset(&self, id: DbId) -> StoreResult<Option<Asset>>;

    /// Look an asset up by its storage key (download-token redemption).
    async fn find_asset_by_path(&self, file_path: &str) -> StoreResult<Option<Asset>>;

    async fn create_asset(&self, input: &CreateAsset) -> StoreResult<Asset>;

    async fn update_asset(&self, id: DbId, input: &UpdateAsset) -> StoreResult<Option<Asset>>;

    async fn delete_asset(&self, id: DbId) -> StoreResult<bool>;

    async fn search_assets(&self, q: &str) -> StoreResult<Vec<Asset>>;

    // -----------------------------------------------------------------------
    // Activity log
    // -----------------------------------------------------------------------

    /// Append one activity entry.
    async fn append_activity(&self, input: &NewActivityEntry) -> StoreResult<ActivityEntry>;

    /// Recent entries, newest first, with limit/offset paging.
    async fn recent_activity(&self, limit: i64, offset: i64) -> StoreResult<Vec<ActivityEntry>>;

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    /// Cheap liveness probe of the backing store.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend label for health output and logs.
    fn backend_name(&self) -> &'static str;
}
