//! Handlers for the `/me` resource (the authenticated user's own record).

use axum::extract::State;
use axum::Json;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_db::models::user::{UpdateUserProfile, UserProfile, UserResponse};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/me
///
/// The current user with profile and resolved role name.
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let me = state
        .store
        .get_user(user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(me))
}

/// PUT /api/v1/me/profile
///
/// Update the current user's display name, phone, or avatar path.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<UserProfile>> {
    input.validate()?;

    let profile = state
        .store
        .update_user_profile(user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(profile))
}
