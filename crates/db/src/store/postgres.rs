//! Postgres-backed [`DataStore`] implementation.
//!
//! A thin delegation layer over the repositories; all SQL lives there.
//! sqlx errors are classified into [`StoreError`] on the way out so the
//! API layer never sees raw driver errors from this path.

use async_trait::async_trait;
use sqlx::PgPool;

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
use crate::repositories::{
    ActivityRepo, AssetRepo, CalendarRepo, CampaignRepo, CollectionRepo, CreatorRepo,
    DepartmentRepo, ProjectRepo, RoleRepo, SessionRepo, TaskRepo, TicketRepo, UserRepo,
};
use crate::store::{DataStore, StoreResult, SEARCH_LIMIT};

/// [`DataStore`] over a live Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for migration and health plumbing.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Assemble the API-facing user view for one auth row.
    async fn user_response(&self, user: User) -> StoreResult<UserResponse> {
        let role = RoleRepo::resolve_name(&self.pool, user.role_id).await?;
        let profile = UserRepo::find_profile(&self.pool, user.id).await?;
        Ok(UserResponse::from_parts(user, role, profile))
    }
}

#[async_trait]
impl DataStore for PgStore {
    // -----------------------------------------------------------------------
    // Users & roles
    // -----------------------------------------------------------------------

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn get_user(&self, id: DbId) -> StoreResult<Option<UserResponse>> {
        match UserRepo::find_by_id(&self.pool, id).await? {
            Some(user) => Ok(Some(self.user_response(user).await?)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> StoreResult<Vec<UserResponse>> {
        let users = UserRepo::list(&self.pool).await?;
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.user_response(user).await?);
        }
        Ok(out)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<UserResponse> {
        let user = UserRepo::create(&self.pool, input).await?;

        let profile = match UserRepo::create_profile(
            &self.pool,
            user.id,
            &input.display_name,
            input.phone.as_deref(),
        )
        .await
        {
            Ok(profile) => profile,
            Err(err) => {
                // Compensating delete: do not leave an auth row without a
                // profile. The cleanup itself is best effort.
                if let Err(cleanup_err) = UserRepo::hard_delete(&self.pool, user.id).await {
                    tracing::warn!(
                        user_id = user.id,
                        error = %cleanup_err,
                        "failed to roll back user row after profile insert error",
                    );
                }
                return Err(err.into());
            }
        };

        let role = RoleRepo::resolve_name(&self.pool, user.role_id).await?;
        Ok(UserResponse::from_parts(user, role, Some(profile)))
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<UserResponse>> {
        match UserRepo::update(&self.pool, id, input).await? {
            Some(user) => Ok(Some(self.user_response(user).await?)),
            None => Ok(None),
        }
    }

    async fn update_user_profile(
        &self,
        user_id: DbId,
        input: &UpdateUserProfile,
    ) -> StoreResult<Option<UserProfile>> {
        Ok(UserRepo::update_profile(&self.pool, user_id, input).await?)
    }

    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> StoreResult<bool> {
        Ok(UserRepo::set_password_hash(&self.pool, user_id, password_hash).await?)
    }

    async fn deactivate_user(&self, id: DbId) -> StoreResult<bool> {
        Ok(UserRepo::deactivate(&self.pool, id).await?)
    }

    async fn record_login_success(&self, id: DbId) -> StoreResult<()> {
        Ok(UserRepo::record_login_success(&self.pool, id).await?)
    }

    async fn record_login_failure(&self, id: DbId) -> StoreResult<()> {
        Ok(UserRepo::increment_failed_login(&self.pool, id).await?)
    }

    async fn lock_user(&self, id: DbId, until: Timestamp) -> StoreResult<()> {
        Ok(UserRepo::lock_account(&self.pool, id, until).await?)
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(RoleRepo::list(&self.pool).await?)
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        Ok(RoleRepo::find_by_name(&self.pool, name).await?)
    }

    async fn role_name(&self, role_id: DbId) -> StoreResult<String> {
        Ok(RoleRepo::resolve_name(&self.pool, role_id).await?)
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>> {
        Ok(SessionRepo::find_by_token_hash(&self.pool, hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64> {
        Ok(SessionRepo::revoke_all_for_user(&self.pool, user_id).await?)
    }

    async fn purge_dead_sessions(&self) -> StoreResult<u64> {
        Ok(SessionRepo::cleanup_expired(&self.pool).await?)
    }

    // -----------------------------------------------------------------------
    // Departments
    // -----------------------------------------------------------------------

    async fn list_departments(&self) -> StoreResult<Vec<Department>> {
        Ok(DepartmentRepo::list(&self.pool).await?)
    }

    async fn find_department(&self, id: DbId) -> StoreResult<Option<Department>> {
        Ok(DepartmentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_department(&self, input: &CreateDepartment) -> StoreResult<Department> {
        Ok(DepartmentRepo::create(&self.pool, input).await?)
    }

    async fn update_department(
        &self,
        id: DbId,
        input: &UpdateDepartment,
    ) -> StoreResult<Option<Department>> {
        Ok(DepartmentRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_department(&self, id: DbId) -> StoreResult<bool> {
        Ok(DepartmentRepo::delete(&self.pool, id).await?)
    }

    async fn search_departments(&self, q: &str) -> StoreResult<Vec<Department>> {
        Ok(DepartmentRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list(&self.pool, filter).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        Ok(ProjectRepo::create(&self.pool, input).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_projects(&self, q: &str) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::list(&self.pool, filter).await?)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task> {
        Ok(TaskRepo::create(&self.pool, input).await?)
    }

    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(TaskRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_tasks(&self, q: &str) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------------

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        Ok(TicketRepo::list(&self.pool, filter).await?)
    }

    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        Ok(TicketRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_ticket(&self, input: &CreateTicket) -> StoreResult<Ticket> {
        Ok(TicketRepo::create(&self.pool, input).await?)
    }

    async fn update_ticket(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>> {
        Ok(TicketRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool> {
        Ok(TicketRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_tickets(&self, q: &str) -> StoreResult<Vec<Ticket>> {
        Ok(TicketRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    async fn list_collections(&self, filter: &CollectionFilter) -> StoreResult<Vec<Collection>> {
        Ok(CollectionRepo::list(&self.pool, filter).await?)
    }

    async fn find_collection(&self, id: DbId) -> StoreResult<Option<Collection>> {
        Ok(CollectionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_collection(&self, input: &CreateCollection) -> StoreResult<Collection> {
        Ok(CollectionRepo::create(&self.pool, input).await?)
    }

    async fn update_collection(
        &self,
        id: DbId,
        input: &UpdateCollection,
    ) -> StoreResult<Option<Collection>> {
        Ok(CollectionRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_collection(&self, id: DbId) -> StoreResult<bool> {
        Ok(CollectionRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_collections(&self, q: &str) -> StoreResult<Vec<Collection>> {
        Ok(CollectionRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // UGC creators
    // -----------------------------------------------------------------------

    async fn list_creators(&self, filter: &CreatorFilter) -> StoreResult<Vec<Creator>> {
        Ok(CreatorRepo::list(&self.pool, filter).await?)
    }

    async fn find_creator(&self, id: DbId) -> StoreResult<Option<Creator>> {
        Ok(CreatorRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_creator(&self, input: &CreateCreator) -> StoreResult<Creator> {
        Ok(CreatorRepo::create(&self.pool, input).await?)
    }

    async fn update_creator(
        &self,
        id: DbId,
        input: &UpdateCreator,
    ) -> StoreResult<Option<Creator>> {
        Ok(CreatorRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_creator(&self, id: DbId) -> StoreResult<bool> {
        Ok(CreatorRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_creators(&self, q: &str) -> StoreResult<Vec<Creator>> {
        Ok(CreatorRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Campaigns
    // -----------------------------------------------------------------------

    async fn list_campaigns(&self, filter: &CampaignFilter) -> StoreResult<Vec<Campaign>> {
        Ok(CampaignRepo::list(&self.pool, filter).await?)
    }

    async fn find_campaign(&self, id: DbId) -> StoreResult<Option<Campaign>> {
        Ok(CampaignRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_campaign(&self, input: &CreateCampaign) -> StoreResult<Campaign> {
        Ok(CampaignRepo::create(&self.pool, input).await?)
    }

    async fn update_campaign(
        &self,
        id: DbId,
        input: &UpdateCampaign,
    ) -> StoreResult<Option<Campaign>> {
        Ok(CampaignRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_campaign(&self, id: DbId) -> StoreResult<bool> {
        Ok(CampaignRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_campaigns(&self, q: &str) -> StoreResult<Vec<Campaign>> {
        Ok(CampaignRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Launch calendar
    // -----------------------------------------------------------------------

    async fn list_calendar_events(
        &self,
        filter: &CalendarFilter,
    ) -> StoreResult<Vec<CalendarEvent>> {
        Ok(CalendarRepo::list(&self.pool, filter).await?)
    }

    async fn find_calendar_event(&self, id: DbId) -> StoreResult<Option<CalendarEvent>> {
        Ok(CalendarRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_calendar_event(
        &self,
        input: &CreateCalendarEvent,
    ) -> StoreResult<CalendarEvent> {
        Ok(CalendarRepo::create(&self.pool, input).await?)
    }

    async fn update_calendar_event(
        &self,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> StoreResult<Option<CalendarEvent>> {
        Ok(CalendarRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_calendar_event(&self, id: DbId) -> StoreResult<bool> {
        Ok(CalendarRepo::delete(&self.pool, id).await?)
    }

    async fn search_calendar_events(&self, q: &str) -> StoreResult<Vec<CalendarEvent>> {
        Ok(CalendarRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    async fn upcoming_calendar_events(
        &self,
        today: Date,
        limit: i64,
    ) -> StoreResult<Vec<CalendarEvent>> {
        Ok(CalendarRepo::upcoming(&self.pool, today, limit).await?)
    }

    // -----------------------------------------------------------------------
    // Assets
    // -----------------------------------------------------------------------

    async fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>> {
        Ok(AssetRepo::list(&self.pool, filter).await?)
    }

    async fn find_asset(&self, id: DbId) -> StoreResult<Option<Asset>> {
        Ok(AssetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_asset_by_path(&self, file_path: &str) -> StoreResult<Option<Asset>> {
        Ok(AssetRepo::find_by_path(&self.pool, file_path).await?)
    }

    async fn create_asset(&self, input: &CreateAsset) -> StoreResult<Asset> {
        Ok(AssetRepo::create(&self.pool, input).await?)
    }

    async fn update_asset(&self, id: DbId, input: &UpdateAsset) -> StoreResult<Option<Asset>> {
        Ok(AssetRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_asset(&self, id: DbId) -> StoreResult<bool> {
        Ok(AssetRepo::soft_delete(&self.pool, id).await?)
    }

    async fn search_assets(&self, q: &str) -> StoreResult<Vec<Asset>> {
        Ok(AssetRepo::search(&self.pool, q, SEARCH_LIMIT).await?)
    }

    // -----------------------------------------------------------------------
    // Activity log
    // -----------------------------------------------------------------------

    async fn append_activity(&self, input: &NewActivityEntry) -> StoreResult<ActivityEntry> {
        Ok(ActivityRepo::append(&self.pool, input).await?)
    }

    async fn recent_activity(&self, limit: i64, offset: i64) -> StoreResult<Vec<ActivityEntry>> {
        Ok(ActivityRepo::list_recent(&self.pool, limit, offset).await?)
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
