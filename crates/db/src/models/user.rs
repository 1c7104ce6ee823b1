//! User and user-profile models and DTOs.
//!
//! Auth columns (password hash, lockout counters) live on `users`;
//! display data (name, phone, avatar) lives on `user_profiles`. The two
//! are created together and joined into [`UserResponse`] for API output.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use validator::Validate;

use mqhub_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A profile row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub user_id: DbId,
    pub display_name: String,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
///
/// Combines the auth row, the resolved role name, and the profile row.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Resolved role name (e.g. `"admin"`, `"manager"`).
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub display_name: String,
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Assemble the response from its three sources.
    ///
    /// A missing profile row falls back to the username as display name,
    /// so a half-created account still renders.
    pub fn from_parts(user: User, role: String, profile: Option<UserProfile>) -> Self {
        let (display_name, phone, avatar_path) = match profile {
            Some(p) => (p.display_name, p.phone, p.avatar_path),
            None => (user.username.clone(), None, None),
        };
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            role_id: user.role_id,
            is_active: user.is_active,
            display_name,
            phone,
            avatar_path,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user together with its profile row.
///
/// The password arrives here already hashed; plaintext handling stays in
/// the API layer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub display_name: String,
    pub phone: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// DTO for updating a user profile. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateUserProfile {
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    pub avatar_path: Option<String>,
}
