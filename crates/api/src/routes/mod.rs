pub mod admin;
pub mod asset;
pub mod auth;
pub mod calendar;
pub mod campaign;
pub mod catalog;
pub mod collection;
pub mod creator;
pub mod dashboard;
pub mod department;
pub mod health;
pub mod me;
pub mod project;
pub mod task;
pub mod ticket;
pub mod timeline;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    get, update
/// /admin/users/{id}/reset-password     reset password (POST)
/// /admin/users/{id}/deactivate         deactivate (POST)
/// /admin/roles                         list roles
///
/// /me                                  current user (GET)
/// /me/profile                          update own profile (PUT)
///
/// /departments                         list, create
/// /departments/search                  search
/// /departments/{id}                    get, update, delete
///
/// /projects                            list, create
/// /projects/search                     search
/// /projects/{id}                       get, update, delete
/// /projects/{project_id}/tasks         list, create
///
/// /tasks/search                        search
/// /tasks/{id}                          get, update, delete
///
/// /tickets, /collections, /ugc,
/// /campaigns, /calendar                same CRUD + search shape
///
/// /assets                              list
/// /assets/upload                       multipart upload (POST)
/// /assets/search                       search
/// /assets/{id}                         get, update, delete
/// /assets/{id}/download-url            signed URL (GET)
/// /files/{token}                       redeem signed URL (public)
///
/// /dashboard/project-progress          progress widget
/// /dashboard/stalled-projects          stalled widget (?days=)
/// /dashboard/blocked-tasks             blocked widget
/// /dashboard/open-tickets              per-department open counts
/// /dashboard/upcoming-events           next calendar entries (?limit=)
/// /dashboard/activity                  activity feed (?limit=&offset=)
///
/// /timeline/projects                   project Gantt rows (?from=&to=)
/// /timeline/calendar                   calendar Gantt rows (?from=&to=)
///
/// /statuses                            status catalogs with display colors
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user and role management).
        .nest("/admin", admin::router())
        // Current-user endpoints.
        .nest("/me", me::router())
        // Business entity CRUD.
        .nest("/departments", department::router())
        // Project routes (also nests task list/create).
        .nest("/projects", project::router())
        // Flat per-task routes.
        .nest("/tasks", task::router())
        .nest("/tickets", ticket::router())
        .nest("/collections", collection::router())
        // UGC creator roster.
        .nest("/ugc", creator::router())
        .nest("/campaigns", campaign::router())
        // Launch calendar.
        .nest("/calendar", calendar::router())
        // Asset library and uploads.
        .nest("/assets", asset::router())
        // Public signed-URL downloads.
        .nest("/files", asset::files_router())
        // Dashboard widget data.
        .nest("/dashboard", dashboard::router())
        // Gantt timeline rows.
        .nest("/timeline", timeline::router())
        // Status catalogs for badge rendering.
        .nest("/statuses", catalog::router())
}
