//! In-memory [`DataStore`] implementation.
//!
//! Backs development and the default test suite: no database required,
//! state lives in `RwLock<HashMap>` tables with a shared atomic id
//! counter. Visible behavior tracks [`super::PgStore`]: partial updates
//! leave `None` fields unchanged, deletes hide rows from every read,
//! lists come back newest-first, search is a case-insensitive substring
//! match capped at [`SEARCH_LIMIT`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use mqhub_core::types::{Date, DbId, Timestamp};
use mqhub_core::{roles, status};

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
use crate::store::{DataStore, StoreError, StoreResult, SEARCH_LIMIT};

/// Case-insensitive substring match, the in-memory analogue of `ILIKE`.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// [`DataStore`] held entirely in process memory.
pub struct MemStore {
    next_id: AtomicI64,
    /// Seeded at construction, mirroring the roles migration.
    roles: Vec<Role>,
    users: RwLock<HashMap<DbId, User>>,
    /// Keyed by `user_id`.
    profiles: RwLock<HashMap<DbId, UserProfile>>,
    sessions: RwLock<HashMap<DbId, Session>>,
    departments: RwLock<HashMap<DbId, Department>>,
    projects: RwLock<HashMap<DbId, Project>>,
    tasks: RwLock<HashMap<DbId, Task>>,
    tickets: RwLock<HashMap<DbId, Ticket>>,
    collections: RwLock<HashMap<DbId, Collection>>,
    creators: RwLock<HashMap<DbId, Creator>>,
    campaigns: RwLock<HashMap<DbId, Campaign>>,
    calendar: RwLock<HashMap<DbId, CalendarEvent>>,
    assets: RwLock<HashMap<DbId, Asset>>,
    activity: RwLock<Vec<ActivityEntry>>,
    /// Failure injection, armed by the `fail_next_*` methods: the next
    /// matching insert fails with [`StoreError::Internal`] so callers can
    /// exercise their compensation paths.
    profile_insert_fails: AtomicBool,
    asset_insert_fails: AtomicBool,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let seeded_roles = [
            (1, roles::ROLE_ADMIN, "Full access, user management"),
            (2, roles::ROLE_MANAGER, "Team and content management"),
            (3, roles::ROLE_MEMBER, "Day-to-day usage"),
        ];
        Self {
            next_id: AtomicI64::new(1),
            roles: seeded_roles
                .into_iter()
                .map(|(id, name, description)| Role {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    created_at: now,
                })
                .collect(),
            users: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            departments: RwLock::new(HashMap::new()),
            projects: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            tickets: RwLock::new(HashMap::new()),
            collections: RwLock::new(HashMap::new()),
            creators: RwLock::new(HashMap::new()),
            campaigns: RwLock::new(HashMap::new()),
            calendar: RwLock::new(HashMap::new()),
            assets: RwLock::new(HashMap::new()),
            activity: RwLock::new(Vec::new()),
            profile_insert_fails: AtomicBool::new(false),
            asset_insert_fails: AtomicBool::new(false),
        }
    }

    /// Make the next profile insert fail, for exercising the user-create
    /// compensation path.
    pub fn fail_next_profile_insert(&self) {
        self.profile_insert_fails.store(true, Ordering::SeqCst);
    }

    /// Make the next asset insert fail, for exercising the upload cleanup
    /// path.
    pub fn fail_next_asset_insert(&self) {
        self.asset_insert_fails.store(true, Ordering::SeqCst);
    }

    fn next_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn role_name_sync(&self, role_id: DbId) -> String {
        self.roles
            .iter()
            .find(|r| r.id == role_id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    async fn user_response(&self, user: User) -> UserResponse {
        let role = self.role_name_sync(user.role_id);
        let profile = self.profiles.read().await.get(&user.id).cloned();
        UserResponse::from_parts(user, role, profile)
    }
}

#[async_trait]
impl DataStore for MemStore {
    // -----------------------------------------------------------------------
    // Users & roles
    // -----------------------------------------------------------------------

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_user(&self, id: DbId) -> StoreResult<Option<UserResponse>> {
        match self.users.read().await.get(&id).cloned() {
            Some(user) => Ok(Some(self.user_response(user).await)),
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> StoreResult<Vec<UserResponse>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.user_response(user).await);
        }
        Ok(out)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<UserResponse> {
        let now = Utc::now();
        let user = {
            let mut users = self.users.write().await;
            if users.values().any(|u| u.username == input.username) {
                return Err(StoreError::Conflict(format!(
                    "username '{}' is already taken",
                    input.username
                )));
            }
            if users.values().any(|u| u.email == input.email) {
                return Err(StoreError::Conflict(format!(
                    "email '{}' is already registered",
                    input.email
                )));
            }
            let user = User {
                id: self.next_id(),
                username: input.username.clone(),
                email: input.email.clone(),
                password_hash: input.password_hash.clone(),
                role_id: input.role_id,
                is_active: true,
                last_login_at: None,
                failed_login_count: 0,
                locked_until: None,
                created_at: now,
                updated_at: now,
            };
            users.insert(user.id, user.clone());
            user
        };

        if self.profile_insert_fails.swap(false, Ordering::SeqCst) {
            // Compensating delete: no orphan auth row on profile failure.
            self.users.write().await.remove(&user.id);
            return Err(StoreError::Internal(
                "simulated profile insert failure".to_string(),
            ));
        }

        let profile = UserProfile {
            user_id: user.id,
            display_name: input.display_name.clone(),
            phone: input.phone.clone(),
            avatar_path: None,
            created_at: now,
            updated_at: now,
        };
        self.profiles.write().await.insert(user.id, profile.clone());

        let role = self.role_name_sync(user.role_id);
        Ok(UserResponse::from_parts(user, role, Some(profile)))
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<UserResponse>> {
        let updated = {
            let mut users = self.users.write().await;
            let Some(user) = users.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(username) = &input.username {
                user.username = username.clone();
            }
            if let Some(email) = &input.email {
                user.email = email.clone();
            }
            if let Some(role_id) = input.role_id {
                user.role_id = role_id;
            }
            if let Some(is_active) = input.is_active {
                user.is_active = is_active;
            }
            user.updated_at = Utc::now();
            user.clone()
        };
        Ok(Some(self.user_response(updated).await))
    }

    async fn update_user_profile(
        &self,
        user_id: DbId,
        input: &UpdateUserProfile,
    ) -> StoreResult<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(display_name) = &input.display_name {
            profile.display_name = display_name.clone();
        }
        if let Some(phone) = &input.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(avatar_path) = &input.avatar_path {
            profile.avatar_path = Some(avatar_path.clone());
        }
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn set_password_hash(&self, user_id: DbId, password_hash: &str) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_user(&self, id: DbId) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if user.is_active => {
                user.is_active = false;
                user.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_login_success(&self, id: DbId) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.failed_login_count = 0;
            user.locked_until = None;
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn record_login_failure(&self, id: DbId) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.failed_login_count += 1;
        }
        Ok(())
    }

    async fn lock_user(&self, id: DbId, until: Timestamp) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.locked_until = Some(until);
        }
        Ok(())
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.roles.clone())
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn role_name(&self, role_id: DbId) -> StoreResult<String> {
        Ok(self.role_name_sync(role_id))
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        let session = Session {
            id: self.next_id(),
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .find(|s| s.refresh_token_hash == hash && s.revoked_at.is_none() && s.expires_at > now)
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) if session.revoked_at.is_none() => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_sessions_for_user(&self, user_id: DbId) -> StoreResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let mut revoked = 0;
        for session in sessions.values_mut() {
            if session.user_id == user_id && session.revoked_at.is_none() {
                session.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn purge_dead_sessions(&self) -> StoreResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.revoked_at.is_none() && s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }

    // -----------------------------------------------------------------------
    // Departments
    // -----------------------------------------------------------------------

    async fn list_departments(&self) -> StoreResult<Vec<Department>> {
        let mut rows: Vec<Department> = self.departments.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_department(&self, id: DbId) -> StoreResult<Option<Department>> {
        Ok(self.departments.read().await.get(&id).cloned())
    }

    async fn create_department(&self, input: &CreateDepartment) -> StoreResult<Department> {
        let mut departments = self.departments.write().await;
        if departments.values().any(|d| d.slug == input.slug) {
            return Err(StoreError::Conflict(format!(
                "department slug '{}' already exists",
                input.slug
            )));
        }
        let now = Utc::now();
        let department = Department {
            id: self.next_id(),
            name: input.name.clone(),
            slug: input.slug.clone(),
            lead_id: input.lead_id,
            created_at: now,
            updated_at: now,
        };
        departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn update_department(
        &self,
        id: DbId,
        input: &UpdateDepartment,
    ) -> StoreResult<Option<Department>> {
        let mut departments = self.departments.write().await;
        if let Some(slug) = &input.slug {
            if departments.values().any(|d| d.id != id && &d.slug == slug) {
                return Err(StoreError::Conflict(format!(
                    "department slug '{slug}' already exists"
                )));
            }
        }
        let Some(department) = departments.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            department.name = name.clone();
        }
        if let Some(slug) = &input.slug {
            department.slug = slug.clone();
        }
        if let Some(lead_id) = input.lead_id {
            department.lead_id = Some(lead_id);
        }
        department.updated_at = Utc::now();
        Ok(Some(department.clone()))
    }

    async fn delete_department(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.departments.write().await.remove(&id).is_some())
    }

    async fn search_departments(&self, q: &str) -> StoreResult<Vec<Department>> {
        let mut rows: Vec<Department> = self
            .departments
            .read()
            .await
            .values()
            .filter(|d| contains_ci(&d.name, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        let mut rows: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| filter.status.as_ref().map_or(true, |s| &p.status == s))
            .filter(|p| filter.owner_id.map_or(true, |id| p.owner_id == Some(id)))
            .filter(|p| {
                filter
                    .department_id
                    .map_or(true, |id| p.department_id == Some(id))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: self.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::project::PLANNING.to_string()),
            owner_id: input.owner_id,
            department_id: input.department_id,
            start_date: input.start_date,
            end_date: input.end_date,
            tags: input.tags.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            project.name = name.clone();
        }
        if let Some(description) = &input.description {
            project.description = Some(description.clone());
        }
        if let Some(project_status) = &input.status {
            project.status = project_status.clone();
        }
        if let Some(owner_id) = input.owner_id {
            project.owner_id = Some(owner_id);
        }
        if let Some(department_id) = input.department_id {
            project.department_id = Some(department_id);
        }
        if let Some(start_date) = input.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = input.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(tags) = &input.tags {
            project.tags = tags.clone();
        }
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }

    async fn search_projects(&self, q: &str) -> StoreResult<Vec<Project>> {
        let mut rows: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| contains_ci(&p.name, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let mut rows: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| filter.project_id.map_or(true, |id| t.project_id == id))
            .filter(|t| filter.status.as_ref().map_or(true, |s| &t.status == s))
            .filter(|t| filter.assignee_id.map_or(true, |id| t.assignee_id == Some(id)))
            .filter(|t| filter.priority.as_ref().map_or(true, |p| &t.priority == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn create_task(&self, input: &CreateTask) -> StoreResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: self.next_id(),
            project_id: input.project_id,
            title: input.title.clone(),
            description: input.description.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::task::TODO.to_string()),
            assignee_id: input.assignee_id,
            due_date: input.due_date,
            priority: input
                .priority
                .clone()
                .unwrap_or_else(|| status::priority::NORMAL.to_string()),
            blocked_reason: input.blocked_reason.clone(),
            tags: input.tags.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: DbId, input: &UpdateTask) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            task.title = title.clone();
        }
        if let Some(description) = &input.description {
            task.description = Some(description.clone());
        }
        if let Some(task_status) = &input.status {
            task.status = task_status.clone();
        }
        if let Some(assignee_id) = input.assignee_id {
            task.assignee_id = Some(assignee_id);
        }
        if let Some(due_date) = input.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = &input.priority {
            task.priority = priority.clone();
        }
        if let Some(blocked_reason) = &input.blocked_reason {
            task.blocked_reason = Some(blocked_reason.clone());
        }
        if let Some(tags) = &input.tags {
            task.tags = tags.clone();
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn search_tasks(&self, q: &str) -> StoreResult<Vec<Task>> {
        let mut rows: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| contains_ci(&t.title, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------------

    async fn list_tickets(&self, filter: &TicketFilter) -> StoreResult<Vec<Ticket>> {
        let mut rows: Vec<Ticket> = self
            .tickets
            .read()
            .await
            .values()
            .filter(|t| filter.status.as_ref().map_or(true, |s| &t.status == s))
            .filter(|t| {
                filter
                    .department_id
                    .map_or(true, |id| t.department_id == Some(id))
            })
            .filter(|t| filter.assignee_id.map_or(true, |id| t.assignee_id == Some(id)))
            .filter(|t| filter.priority.as_ref().map_or(true, |p| &t.priority == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_ticket(&self, id: DbId) -> StoreResult<Option<Ticket>> {
        Ok(self.tickets.read().await.get(&id).cloned())
    }

    async fn create_ticket(&self, input: &CreateTicket) -> StoreResult<Ticket> {
        let now = Utc::now();
        let ticket = Ticket {
            id: self.next_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            department_id: input.department_id,
            requester_id: input.requester_id,
            assignee_id: input.assignee_id,
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::ticket::OPEN.to_string()),
            priority: input
                .priority
                .clone()
                .unwrap_or_else(|| status::priority::NORMAL.to_string()),
            created_at: now,
            updated_at: now,
        };
        self.tickets.write().await.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(&self, id: DbId, input: &UpdateTicket) -> StoreResult<Option<Ticket>> {
        let mut tickets = self.tickets.write().await;
        let Some(ticket) = tickets.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            ticket.title = title.clone();
        }
        if let Some(description) = &input.description {
            ticket.description = Some(description.clone());
        }
        if let Some(department_id) = input.department_id {
            ticket.department_id = Some(department_id);
        }
        if let Some(assignee_id) = input.assignee_id {
            ticket.assignee_id = Some(assignee_id);
        }
        if let Some(ticket_status) = &input.status {
            ticket.status = ticket_status.clone();
        }
        if let Some(priority) = &input.priority {
            ticket.priority = priority.clone();
        }
        ticket.updated_at = Utc::now();
        Ok(Some(ticket.clone()))
    }

    async fn delete_ticket(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tickets.write().await.remove(&id).is_some())
    }

    async fn search_tickets(&self, q: &str) -> StoreResult<Vec<Ticket>> {
        let mut rows: Vec<Ticket> = self
            .tickets
            .read()
            .await
            .values()
            .filter(|t| contains_ci(&t.title, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    async fn list_collections(&self, filter: &CollectionFilter) -> StoreResult<Vec<Collection>> {
        let mut rows: Vec<Collection> = self
            .collections
            .read()
            .await
            .values()
            .filter(|c| filter.status.as_ref().map_or(true, |s| &c.status == s))
            .filter(|c| {
                filter
                    .season
                    .as_ref()
                    .map_or(true, |s| c.season.as_ref() == Some(s))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_collection(&self, id: DbId) -> StoreResult<Option<Collection>> {
        Ok(self.collections.read().await.get(&id).cloned())
    }

    async fn create_collection(&self, input: &CreateCollection) -> StoreResult<Collection> {
        let now = Utc::now();
        let collection = Collection {
            id: self.next_id(),
            name: input.name.clone(),
            season: input.season.clone(),
            description: input.description.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::collection::CONCEPT.to_string()),
            launch_date: input.launch_date,
            piece_count: input.piece_count,
            tags: input.tags.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.collections
            .write()
            .await
            .insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn update_collection(
        &self,
        id: DbId,
        input: &UpdateCollection,
    ) -> StoreResult<Option<Collection>> {
        let mut collections = self.collections.write().await;
        let Some(collection) = collections.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            collection.name = name.clone();
        }
        if let Some(season) = &input.season {
            collection.season = Some(season.clone());
        }
        if let Some(description) = &input.description {
            collection.description = Some(description.clone());
        }
        if let Some(collection_status) = &input.status {
            collection.status = collection_status.clone();
        }
        if let Some(launch_date) = input.launch_date {
            collection.launch_date = Some(launch_date);
        }
        if let Some(piece_count) = input.piece_count {
            collection.piece_count = Some(piece_count);
        }
        if let Some(tags) = &input.tags {
            collection.tags = tags.clone();
        }
        collection.updated_at = Utc::now();
        Ok(Some(collection.clone()))
    }

    async fn delete_collection(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.collections.write().await.remove(&id).is_some())
    }

    async fn search_collections(&self, q: &str) -> StoreResult<Vec<Collection>> {
        let mut rows: Vec<Collection> = self
            .collections
            .read()
            .await
            .values()
            .filter(|c| contains_ci(&c.name, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // UGC creators
    // -----------------------------------------------------------------------

    async fn list_creators(&self, filter: &CreatorFilter) -> StoreResult<Vec<Creator>> {
        let mut rows: Vec<Creator> = self
            .creators
            .read()
            .await
            .values()
            .filter(|c| filter.status.as_ref().map_or(true, |s| &c.status == s))
            .filter(|c| filter.platform.as_ref().map_or(true, |p| &c.platform == p))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_creator(&self, id: DbId) -> StoreResult<Option<Creator>> {
        Ok(self.creators.read().await.get(&id).cloned())
    }

    async fn create_creator(&self, input: &CreateCreator) -> StoreResult<Creator> {
        let now = Utc::now();
        let creator = Creator {
            id: self.next_id(),
            name: input.name.clone(),
            handle: input.handle.clone(),
            platform: input.platform.clone(),
            followers: input.followers.unwrap_or(0),
            engagement_rate: input.engagement_rate,
            email: input.email.clone(),
            phone: input.phone.clone(),
            rate_per_post: input.rate_per_post,
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::creator::PROSPECT.to_string()),
            tags: input.tags.clone().unwrap_or_default(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.creators
            .write()
            .await
            .insert(creator.id, creator.clone());
        Ok(creator)
    }

    async fn update_creator(
        &self,
        id: DbId,
        input: &UpdateCreator,
    ) -> StoreResult<Option<Creator>> {
        let mut creators = self.creators.write().await;
        let Some(creator) = creators.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            creator.name = name.clone();
        }
        if let Some(handle) = &input.handle {
            creator.handle = handle.clone();
        }
        if let Some(platform) = &input.platform {
            creator.platform = platform.clone();
        }
        if let Some(followers) = input.followers {
            creator.followers = followers;
        }
        if let Some(engagement_rate) = input.engagement_rate {
            creator.engagement_rate = Some(engagement_rate);
        }
        if let Some(email) = &input.email {
            creator.email = Some(email.clone());
        }
        if let Some(phone) = &input.phone {
            creator.phone = Some(phone.clone());
        }
        if let Some(rate_per_post) = input.rate_per_post {
            creator.rate_per_post = Some(rate_per_post);
        }
        if let Some(creator_status) = &input.status {
            creator.status = creator_status.clone();
        }
        if let Some(tags) = &input.tags {
            creator.tags = tags.clone();
        }
        if let Some(notes) = &input.notes {
            creator.notes = Some(notes.clone());
        }
        creator.updated_at = Utc::now();
        Ok(Some(creator.clone()))
    }

    async fn delete_creator(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.creators.write().await.remove(&id).is_some())
    }

    async fn search_creators(&self, q: &str) -> StoreResult<Vec<Creator>> {
        let mut rows: Vec<Creator> = self
            .creators
            .read()
            .await
            .values()
            .filter(|c| contains_ci(&c.name, q) || contains_ci(&c.handle, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Campaigns
    // -----------------------------------------------------------------------

    async fn list_campaigns(&self, filter: &CampaignFilter) -> StoreResult<Vec<Campaign>> {
        let mut rows: Vec<Campaign> = self
            .campaigns
            .read()
            .await
            .values()
            .filter(|c| filter.status.as_ref().map_or(true, |s| &c.status == s))
            .filter(|c| {
                filter
                    .collection_id
                    .map_or(true, |id| c.collection_id == Some(id))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_campaign(&self, id: DbId) -> StoreResult<Option<Campaign>> {
        Ok(self.campaigns.read().await.get(&id).cloned())
    }

    async fn create_campaign(&self, input: &CreateCampaign) -> StoreResult<Campaign> {
        let now = Utc::now();
        let campaign = Campaign {
            id: self.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            collection_id: input.collection_id,
            channel: input.channel.clone(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| status::campaign::DRAFT.to_string()),
            start_date: input.start_date,
            end_date: input.end_date,
            budget: input.budget,
            investments: input
                .investments
                .clone()
                .unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
            created_at: now,
            updated_at: now,
        };
        self.campaigns
            .write()
            .await
            .insert(campaign.id, campaign.clone());
        Ok(campaign)
    }

    async fn update_campaign(
        &self,
        id: DbId,
        input: &UpdateCampaign,
    ) -> StoreResult<Option<Campaign>> {
        let mut campaigns = self.campaigns.write().await;
        let Some(campaign) = campaigns.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            campaign.name = name.clone();
        }
        if let Some(description) = &input.description {
            campaign.description = Some(description.clone());
        }
        if let Some(collection_id) = input.collection_id {
            campaign.collection_id = Some(collection_id);
        }
        if let Some(channel) = &input.channel {
            campaign.channel = Some(channel.clone());
        }
        if let Some(campaign_status) = &input.status {
            campaign.status = campaign_status.clone();
        }
        if let Some(start_date) = input.start_date {
            campaign.start_date = Some(start_date);
        }
        if let Some(end_date) = input.end_date {
            campaign.end_date = Some(end_date);
        }
        if let Some(budget) = input.budget {
            campaign.budget = Some(budget);
        }
        if let Some(investments) = &input.investments {
            campaign.investments = investments.clone();
        }
        campaign.updated_at = Utc::now();
        Ok(Some(campaign.clone()))
    }

    async fn delete_campaign(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.campaigns.write().await.remove(&id).is_some())
    }

    async fn search_campaigns(&self, q: &str) -> StoreResult<Vec<Campaign>> {
        let mut rows: Vec<Campaign> = self
            .campaigns
            .read()
            .await
            .values()
            .filter(|c| contains_ci(&c.name, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Launch calendar
    // -----------------------------------------------------------------------

    async fn list_calendar_events(
        &self,
        filter: &CalendarFilter,
    ) -> StoreResult<Vec<CalendarEvent>> {
        let mut rows: Vec<CalendarEvent> = self
            .calendar
            .read()
            .await
            .values()
            .filter(|e| filter.from.map_or(true, |from| e.end_date >= from))
            .filter(|e| filter.to.map_or(true, |to| e.start_date <= to))
            .filter(|e| {
                filter
                    .event_type
                    .as_ref()
                    .map_or(true, |t| &e.event_type == t)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));
        Ok(rows)
    }

    async fn find_calendar_event(&self, id: DbId) -> StoreResult<Option<CalendarEvent>> {
        Ok(self.calendar.read().await.get(&id).cloned())
    }

    async fn create_calendar_event(
        &self,
        input: &CreateCalendarEvent,
    ) -> StoreResult<CalendarEvent> {
        let now = Utc::now();
        let event = CalendarEvent {
            id: self.next_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            event_type: input
                .event_type
                .clone()
                .unwrap_or_else(|| status::event_type::MEETING.to_string()),
            start_date: input.start_date,
            end_date: input.end_date.unwrap_or(input.start_date),
            collection_id: input.collection_id,
            campaign_id: input.campaign_id,
            attendees: input.attendees.clone().unwrap_or_default(),
            location: input.location.clone(),
            created_at: now,
            updated_at: now,
        };
        self.calendar.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_calendar_event(
        &self,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> StoreResult<Option<CalendarEvent>> {
        let mut calendar = self.calendar.write().await;
        let Some(event) = calendar.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            event.title = title.clone();
        }
        if let Some(description) = &input.description {
            event.description = Some(description.clone());
        }
        if let Some(event_type) = &input.event_type {
            event.event_type = event_type.clone();
        }
        if let Some(start_date) = input.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            event.end_date = end_date;
        }
        if let Some(collection_id) = input.collection_id {
            event.collection_id = Some(collection_id);
        }
        if let Some(campaign_id) = input.campaign_id {
            event.campaign_id = Some(campaign_id);
        }
        if let Some(attendees) = &input.attendees {
            event.attendees = attendees.clone();
        }
        if let Some(location) = &input.location {
            event.location = Some(location.clone());
        }
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn delete_calendar_event(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.calendar.write().await.remove(&id).is_some())
    }

    async fn search_calendar_events(&self, q: &str) -> StoreResult<Vec<CalendarEvent>> {
        let mut rows: Vec<CalendarEvent> = self
            .calendar
            .read()
            .await
            .values()
            .filter(|e| contains_ci(&e.title, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    async fn upcoming_calendar_events(
        &self,
        today: Date,
        limit: i64,
    ) -> StoreResult<Vec<CalendarEvent>> {
        let mut rows: Vec<CalendarEvent> = self
            .calendar
            .read()
            .await
            .values()
            .filter(|e| e.end_date >= today)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Assets
    // -----------------------------------------------------------------------

    async fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>> {
        let mut rows: Vec<Asset> = self
            .assets
            .read()
            .await
            .values()
            .filter(|a| {
                filter
                    .collection_id
                    .map_or(true, |id| a.collection_id == Some(id))
            })
            .filter(|a| filter.campaign_id.map_or(true, |id| a.campaign_id == Some(id)))
            .filter(|a| filter.uploaded_by.map_or(true, |id| a.uploaded_by == Some(id)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn find_asset(&self, id: DbId) -> StoreResult<Option<Asset>> {
        Ok(self.assets.read().await.get(&id).cloned())
    }

    async fn find_asset_by_path(&self, file_path: &str) -> StoreResult<Option<Asset>> {
        Ok(self
            .assets
            .read()
            .await
            .values()
            .find(|a| a.file_path == file_path)
            .cloned())
    }

    async fn create_asset(&self, input: &CreateAsset) -> StoreResult<Asset> {
        if self.asset_insert_fails.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Internal(
                "simulated asset insert failure".to_string(),
            ));
        }
        let now = Utc::now();
        let asset = Asset {
            id: self.next_id(),
            file_name: input.file_name.clone(),
            file_path: input.file_path.clone(),
            content_type: input.content_type.clone(),
            size_bytes: input.size_bytes,
            collection_id: input.collection_id,
            campaign_id: input.campaign_id,
            uploaded_by: input.uploaded_by,
            tags: input.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        self.assets.write().await.insert(asset.id, asset.clone());
        Ok(asset)
    }

    async fn update_asset(&self, id: DbId, input: &UpdateAsset) -> StoreResult<Option<Asset>> {
        let mut assets = self.assets.write().await;
        let Some(asset) = assets.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(file_name) = &input.file_name {
            asset.file_name = file_name.clone();
        }
        if let Some(collection_id) = input.collection_id {
            asset.collection_id = Some(collection_id);
        }
        if let Some(campaign_id) = input.campaign_id {
            asset.campaign_id = Some(campaign_id);
        }
        if let Some(tags) = &input.tags {
            asset.tags = tags.clone();
        }
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn delete_asset(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.assets.write().await.remove(&id).is_some())
    }

    async fn search_assets(&self, q: &str) -> StoreResult<Vec<Asset>> {
        let mut rows: Vec<Asset> = self
            .assets
            .read()
            .await
            .values()
            .filter(|a| contains_ci(&a.file_name, q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }

    // -----------------------------------------------------------------------
    // Activity log
    // -----------------------------------------------------------------------

    async fn append_activity(&self, input: &NewActivityEntry) -> StoreResult<ActivityEntry> {
        let entry = ActivityEntry {
            id: self.next_id(),
            event_type: input.event_type.clone(),
            source_entity_type: input.source_entity_type.clone(),
            source_entity_id: input.source_entity_id,
            actor_user_id: input.actor_user_id,
            payload: input.payload.clone(),
            created_at: Utc::now(),
        };
        self.activity.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent_activity(&self, limit: i64, offset: i64) -> StoreResult<Vec<ActivityEntry>> {
        let activity = self.activity.read().await;
        Ok(activity
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
