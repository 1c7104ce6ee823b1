//! Handlers for the `/admin` resource (user and role management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_db::models::role::Role;
use mqhub_db::models::user::{CreateUser, UpdateUser, UserResponse};
use mqhub_events::PlatformEvent;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Minimum password length enforced on user creation and password reset.
const MIN_PASSWORD_LENGTH: usize = 12;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role_id: DbId,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new user with their profile. Validates password strength,
/// hashes it, and returns the created [`UserResponse`] with 201.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        role_id: input.role_id,
        display_name: input.display_name,
        phone: input.phone,
    };

    let user = state.store.create_user(&create_dto).await?;

    state.event_bus.publish(
        PlatformEvent::entity_change("user", user.id, "created")
            .with_actor(admin.user_id)
            .with_payload(json!({ "username": user.username })),
    );

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/admin/users
///
/// List all users with resolved role names and profiles.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's account fields (not password, not profile).
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;

    let user = state
        .store
        .update_user(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    state.event_bus.publish(
        PlatformEvent::entity_change("user", id, "updated").with_actor(admin.user_id),
    );

    Ok(Json(user))
}

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Deactivate a user (`is_active = false`). Returns 204 No Content.
/// Admins cannot deactivate their own account.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot deactivate your own account".into(),
        )));
    }

    let deactivated = state.store.deactivate_user(id).await?;
    if deactivated {
        state.event_bus.publish(
            PlatformEvent::entity_change("user", id, "deactivated").with_actor(admin.user_id),
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Admin-initiated password reset. Existing sessions are revoked so the
/// old refresh tokens stop working.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = state.store.set_password_hash(id, &hashed).await?;
    if updated {
        state.store.revoke_sessions_for_user(id).await?;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// GET /api/v1/admin/roles
///
/// List the seeded roles (for user-creation forms).
pub async fn list_roles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Role>>> {
    let roles = state.store.list_roles().await?;
    Ok(Json(roles))
}
