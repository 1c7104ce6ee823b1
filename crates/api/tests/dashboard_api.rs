//! HTTP-level integration tests for the dashboard widget endpoints.
//!
//! Widgets are computed on the fly from store lists; tests seed through
//! the regular entity endpoints and then read the widget output.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, get_auth, post_json_auth, user_with_token};
use mqhub_db::models::activity::NewActivityEntry;
use mqhub_db::store::{DataStore, MemStore};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed(
    store: &Arc<MemStore>,
    token: &str,
    uri: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(store.clone());
    let response = post_json_auth(app, uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri} should create");
    body_json(response).await
}

async fn widget(store: &Arc<MemStore>, token: &str, uri: &str) -> Vec<serde_json::Value> {
    let app = common::build_test_app(store.clone());
    let response = get_auth(app, uri, token).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri} should succeed");
    body_json(response)
        .await
        .as_array()
        .expect("widget response should be an array")
        .clone()
}

// ---------------------------------------------------------------------------
// Project progress
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_project_progress_completion() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash1", 2).await;

    let project = seed(
        &store,
        &token,
        "/api/v1/projects",
        json!({ "name": "Progresso", "status": "active" }),
    )
    .await;
    let pid = project["id"].as_i64().unwrap();
    let tasks_uri = format!("/api/v1/projects/{pid}/tasks");
    seed(&store, &token, &tasks_uri, json!({ "title": "t1", "status": "done" })).await;
    seed(&store, &token, &tasks_uri, json!({ "title": "t2" })).await;
    seed(&store, &token, &tasks_uri, json!({ "title": "t3", "status": "in_progress" })).await;

    let items = widget(&store, &token, "/api/v1/dashboard/project-progress").await;
    assert_eq!(items.len(), 1);
    let row = &items[0];
    assert_eq!(row["project_id"], pid);
    assert_eq!(row["tasks_done"], 1);
    assert_eq!(row["tasks_total"], 3);
    // One of three tasks done, rounded to one decimal.
    assert_eq!(row["completion_pct"], 33.3);
    assert_eq!(row["status"], "active");
    assert_eq!(row["status_color"], "#22c55e");
}

#[tokio::test]
async fn test_project_progress_without_tasks_is_zero() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash2", 2).await;
    seed(&store, &token, "/api/v1/projects", json!({ "name": "Vazio" })).await;

    let items = widget(&store, &token, "/api/v1/dashboard/project-progress").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["tasks_total"], 0);
    assert_eq!(items[0]["completion_pct"], 0.0);
}

// ---------------------------------------------------------------------------
// Stalled projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_stalled_projects_default_threshold_excludes_fresh() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash3", 2).await;
    seed(
        &store,
        &token,
        "/api/v1/projects",
        json!({ "name": "Recente", "status": "active" }),
    )
    .await;

    // Created seconds ago, far under the 14-day default.
    let items = widget(&store, &token, "/api/v1/dashboard/stalled-projects").await;
    assert_eq!(items, Vec::<serde_json::Value>::new());
}

#[tokio::test]
async fn test_stalled_projects_zero_threshold_flags_active_only() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash4", 2).await;
    let active = seed(
        &store,
        &token,
        "/api/v1/projects",
        json!({ "name": "Parado", "status": "active" }),
    )
    .await;
    seed(&store, &token, "/api/v1/projects", json!({ "name": "Planejando" })).await;

    // days=0 makes any quiet moment count; only active projects qualify.
    let items = widget(&store, &token, "/api/v1/dashboard/stalled-projects?days=0").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["project_id"], active["id"].as_i64().unwrap());
    assert_eq!(items[0]["days_quiet"], 0);
}

// ---------------------------------------------------------------------------
// Blocked tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_blocked_tasks_joins_project_name() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash5", 2).await;
    let project = seed(
        &store,
        &token,
        "/api/v1/projects",
        json!({ "name": "Colecao Bloqueada", "status": "active" }),
    )
    .await;
    let pid = project["id"].as_i64().unwrap();
    let tasks_uri = format!("/api/v1/projects/{pid}/tasks");
    seed(
        &store,
        &token,
        &tasks_uri,
        json!({
            "title": "Esperando tecido",
            "status": "blocked",
            "blocked_reason": "Fornecedor atrasou"
        }),
    )
    .await;
    seed(&store, &token, &tasks_uri, json!({ "title": "Andando" })).await;

    let items = widget(&store, &token, "/api/v1/dashboard/blocked-tasks").await;
    assert_eq!(items.len(), 1);
    let row = &items[0];
    assert_eq!(row["title"], "Esperando tecido");
    assert_eq!(row["blocked_reason"], "Fornecedor atrasou");
    assert_eq!(row["project_name"], "Colecao Bloqueada");
    assert!(row["since"].is_string());
}

// ---------------------------------------------------------------------------
// Open tickets per department
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_open_tickets_counts_and_order() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash6", 2).await;
    let dept_a = seed(
        &store,
        &token,
        "/api/v1/departments",
        json!({ "name": "Atendimento", "slug": "atendimento" }),
    )
    .await;
    let dept_b = seed(
        &store,
        &token,
        "/api/v1/departments",
        json!({ "name": "Producao", "slug": "producao" }),
    )
    .await;
    let a = dept_a["id"].as_i64().unwrap();
    let b = dept_b["id"].as_i64().unwrap();

    // Department A: one open + one in_progress count, one closed does not.
    seed(&store, &token, "/api/v1/tickets", json!({ "title": "a1", "department_id": a })).await;
    seed(
        &store,
        &token,
        "/api/v1/tickets",
        json!({ "title": "a2", "department_id": a, "status": "in_progress" }),
    )
    .await;
    seed(
        &store,
        &token,
        "/api/v1/tickets",
        json!({ "title": "a3", "department_id": a, "status": "closed" }),
    )
    .await;
    // Department B: one open.
    seed(&store, &token, "/api/v1/tickets", json!({ "title": "b1", "department_id": b })).await;
    // One open ticket routed to no department.
    seed(&store, &token, "/api/v1/tickets", json!({ "title": "solto" })).await;

    let items = widget(&store, &token, "/api/v1/dashboard/open-tickets").await;
    assert_eq!(items.len(), 3);

    // Busiest bucket first; ties order the no-department bucket ahead.
    assert_eq!(items[0]["department_id"], a);
    assert_eq!(items[0]["department_name"], "Atendimento");
    assert_eq!(items[0]["open_count"], 2);
    assert!(items[1]["department_id"].is_null());
    assert_eq!(items[1]["open_count"], 1);
    assert_eq!(items[2]["department_id"], b);
    assert_eq!(items[2]["open_count"], 1);
}

// ---------------------------------------------------------------------------
// Upcoming events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_upcoming_events_limit_and_order() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash7", 2).await;
    let today = Utc::now().date_naive();

    seed(
        &store,
        &token,
        "/api/v1/calendar",
        json!({ "title": "Ontem", "start_date": (today - Duration::days(1)).to_string() }),
    )
    .await;
    seed(
        &store,
        &token,
        "/api/v1/calendar",
        json!({ "title": "Hoje", "start_date": today.to_string() }),
    )
    .await;
    seed(
        &store,
        &token,
        "/api/v1/calendar",
        json!({ "title": "Semana que vem", "start_date": (today + Duration::days(5)).to_string() }),
    )
    .await;
    seed(
        &store,
        &token,
        "/api/v1/calendar",
        json!({ "title": "Mes que vem", "start_date": (today + Duration::days(30)).to_string() }),
    )
    .await;

    // Yesterday's single-day entry already ended, so three remain.
    let items = widget(&store, &token, "/api/v1/dashboard/upcoming-events").await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "Hoje");

    let items = widget(&store, &token, "/api/v1/dashboard/upcoming-events?limit=2").await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Hoje");
    assert_eq!(items[1]["title"], "Semana que vem");
}

// ---------------------------------------------------------------------------
// Activity feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_activity_feed_paging() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "dash8", 2).await;

    // Appended directly; the HTTP apps in tests run without the
    // activity-writer subscriber attached.
    for event_type in ["project.created", "task.created", "ticket.created"] {
        store
            .append_activity(&NewActivityEntry {
                event_type: event_type.to_string(),
                source_entity_type: None,
                source_entity_id: None,
                actor_user_id: None,
                payload: json!({}),
            })
            .await
            .unwrap();
    }

    let items = widget(&store, &token, "/api/v1/dashboard/activity").await;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["event_type"], "ticket.created");
    assert_eq!(items[2]["event_type"], "project.created");

    let items = widget(&store, &token, "/api/v1/dashboard/activity?limit=1").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["event_type"], "ticket.created");

    let items = widget(&store, &token, "/api/v1/dashboard/activity?limit=1&offset=1").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["event_type"], "task.created");
}

#[tokio::test]
async fn test_dashboard_requires_auth() {
    let app = common::build_test_app(common::new_store());
    let response = get(app, "/api/v1/dashboard/project-progress").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
