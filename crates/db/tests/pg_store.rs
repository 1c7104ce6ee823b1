#![cfg(feature = "pg-tests")]

//! Postgres-backed [`DataStore`] tests.
//!
//! These need a live database; run them with
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p mqhub-db --features pg-tests
//! ```
//!
//! Each test gets its own schema with migrations applied. Coverage
//! focuses on the semantics both backends promise: defaults filled on
//! create, partial updates, soft-deleted rows disappearing from reads,
//! unique violations surfacing as conflicts, and window queries.

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

use mqhub_db::models::calendar::{CalendarFilter, CreateCalendarEvent};
use mqhub_db::models::department::CreateDepartment;
use mqhub_db::models::project::{CreateProject, ProjectFilter, UpdateProject};
use mqhub_db::models::session::CreateSession;
use mqhub_db::models::task::{CreateTask, TaskFilter, UpdateTask};
use mqhub_db::models::ticket::CreateTicket;
use mqhub_db::models::user::CreateUser;
use mqhub_db::store::{DataStore, PgStore, StoreError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        // Opaque at this layer; hashing belongs to the API crate.
        password_hash: "x".repeat(32),
        role_id: 3,
        display_name: username.to_string(),
        phone: None,
    }
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        status: None,
        owner_id: None,
        department_id: None,
        start_date: None,
        end_date: None,
        tags: None,
    }
}

fn new_task(project_id: i64, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        title: title.to_string(),
        description: None,
        status: None,
        assignee_id: None,
        due_date: None,
        priority: None,
        blocked_reason: None,
        tags: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Users & roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn user_create_resolves_role_and_profile(pool: PgPool) {
    let store = PgStore::new(pool);

    let created = store.create_user(&new_user("bia")).await.unwrap();
    assert_eq!(created.username, "bia");
    assert_eq!(created.role, "member");
    assert_eq!(created.display_name, "bia");
    assert!(created.is_active);

    let fetched = store.get_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "bia@test.com");

    let by_name = store.find_user_by_username("bia").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_is_a_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_user(&new_user("uniq")).await.unwrap();

    let mut dup = new_user("uniq");
    dup.email = "other@test.com".to_string();
    let err = store.create_user(&dup).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn project_create_fills_defaults(pool: PgPool) {
    let store = PgStore::new(pool);

    let project = store.create_project(&new_project("Verao")).await.unwrap();
    assert_eq!(project.status, "planning");
    assert!(project.tags.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn project_partial_update_keeps_other_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let project = store.create_project(&new_project("Parcial")).await.unwrap();

    let update = UpdateProject {
        description: Some("Nova descricao".to_string()),
        ..Default::default()
    };
    let updated = store
        .update_project(project.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Parcial");
    assert_eq!(updated.status, "planning");
    assert_eq!(updated.description.as_deref(), Some("Nova descricao"));
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_deleted_project_disappears_from_reads(pool: PgPool) {
    let store = PgStore::new(pool);
    let project = store.create_project(&new_project("Some")).await.unwrap();

    assert!(store.delete_project(project.id).await.unwrap());
    assert!(store.find_project(project.id).await.unwrap().is_none());
    let remaining = store
        .list_projects(&ProjectFilter::default())
        .await
        .unwrap();
    assert!(remaining.is_empty());

    // Deleting twice reports the row as already gone.
    assert!(!store.delete_project(project.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn project_search_is_case_insensitive(pool: PgPool) {
    let store = PgStore::new(pool);
    store
        .create_project(&new_project("Campanha VERAO"))
        .await
        .unwrap();
    store.create_project(&new_project("Outra")).await.unwrap();

    let hits = store.search_projects("verao").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Campanha VERAO");
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn task_defaults_and_status_flow(pool: PgPool) {
    let store = PgStore::new(pool);
    let project = store.create_project(&new_project("Base")).await.unwrap();

    let task = store
        .create_task(&new_task(project.id, "Cortar"))
        .await
        .unwrap();
    assert_eq!(task.status, "todo");
    assert_eq!(task.priority, "normal");

    let update = UpdateTask {
        status: Some("blocked".to_string()),
        blocked_reason: Some("Sem tecido".to_string()),
        ..Default::default()
    };
    let updated = store.update_task(task.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.status, "blocked");
    assert_eq!(updated.blocked_reason.as_deref(), Some("Sem tecido"));

    let filter = TaskFilter {
        project_id: Some(project.id),
        status: Some("blocked".to_string()),
        ..Default::default()
    };
    let blocked = store.list_tasks(&filter).await.unwrap();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].id, task.id);
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn ticket_create_fills_defaults(pool: PgPool) {
    let store = PgStore::new(pool);

    let ticket = store
        .create_ticket(&CreateTicket {
            title: "Trocar etiqueta".to_string(),
            description: None,
            department_id: None,
            requester_id: None,
            assignee_id: None,
            status: None,
            priority: None,
        })
        .await
        .unwrap();

    assert_eq!(ticket.status, "open");
    assert_eq!(ticket.priority, "normal");
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn department_slug_is_unique(pool: PgPool) {
    let store = PgStore::new(pool);
    let input = CreateDepartment {
        name: "Marketing".to_string(),
        slug: "marketing".to_string(),
        lead_id: None,
    };
    store.create_department(&input).await.unwrap();

    let err = store.create_department(&input).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
}

// ---------------------------------------------------------------------------
// Launch calendar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn calendar_window_selects_overlapping_spans(pool: PgPool) {
    let store = PgStore::new(pool);

    store
        .create_calendar_event(&CreateCalendarEvent {
            title: "Shooting".to_string(),
            description: None,
            event_type: Some("shoot".to_string()),
            start_date: date(2026, 1, 5),
            end_date: Some(date(2026, 1, 7)),
            collection_id: None,
            campaign_id: None,
            attendees: None,
            location: None,
        })
        .await
        .unwrap();
    let single = store
        .create_calendar_event(&CreateCalendarEvent {
            title: "Drop".to_string(),
            description: None,
            event_type: None,
            start_date: date(2026, 1, 20),
            end_date: None,
            collection_id: None,
            campaign_id: None,
            attendees: None,
            location: None,
        })
        .await
        .unwrap();

    // Single-day defaults: end date mirrors the start, type is meeting.
    assert_eq!(single.end_date, single.start_date);
    assert_eq!(single.event_type, "meeting");

    let filter = CalendarFilter {
        from: Some(date(2026, 1, 6)),
        to: Some(date(2026, 1, 10)),
        event_type: None,
    };
    let hits = store.list_calendar_events(&filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Shooting");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn session_lifecycle(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = store.create_user(&new_user("sessao")).await.unwrap();

    let session = store
        .create_session(&CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-abc".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        })
        .await
        .unwrap();

    let live = store
        .find_session_by_token_hash("hash-abc")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.id, session.id);

    assert!(store.revoke_session(session.id).await.unwrap());
    // Revoked sessions no longer resolve.
    assert!(store
        .find_session_by_token_hash("hash-abc")
        .await
        .unwrap()
        .is_none());
    assert!(!store.revoke_session(session.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn revoking_all_user_sessions_counts_them(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = store.create_user(&new_user("multi")).await.unwrap();

    for n in 0..3 {
        store
            .create_session(&CreateSession {
                user_id: user.id,
                refresh_token_hash: format!("hash-{n}"),
                expires_at: Utc::now() + Duration::days(7),
            })
            .await
            .unwrap();
    }

    assert_eq!(store.revoke_sessions_for_user(user.id).await.unwrap(), 3);
    assert_eq!(store.revoke_sessions_for_user(user.id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn activity_pages_newest_first(pool: PgPool) {
    use mqhub_db::models::activity::NewActivityEntry;

    let store = PgStore::new(pool);
    for event_type in ["project.created", "task.created", "ticket.created"] {
        store
            .append_activity(&NewActivityEntry {
                event_type: event_type.to_string(),
                source_entity_type: None,
                source_entity_id: None,
                actor_user_id: None,
                payload: serde_json::json!({}),
            })
            .await
            .unwrap();
    }

    let page = store.recent_activity(2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].event_type, "ticket.created");
    assert_eq!(page[1].event_type, "task.created");

    let rest = store.recent_activity(2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].event_type, "project.created");
}
