//! HTTP-level integration tests for auth, admin, and current-user endpoints.
//!
//! Tests cover login, token refresh and rotation, logout, account
//! lockout, RBAC enforcement, admin user management, and `/me`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get, get_auth, post_json, post_json_auth, put_json_auth,
    user_with_token, TEST_PASSWORD,
};
use mqhub_db::store::DataStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Log in a user via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
async fn login_user(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Auth flow tests
// ---------------------------------------------------------------------------

/// Successful login returns 200 with access_token, refresh_token, and user info.
#[tokio::test]
async fn test_login_success() {
    let store = common::new_store();
    let user = create_test_user(&store, "loginuser", 1).await;

    let app = common::build_test_app(store);
    let json = login_user(app, "loginuser", TEST_PASSWORD).await;

    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["refresh_token"].is_string(), "response must contain refresh_token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
    assert_eq!(json["user"]["role"], "admin");
}

/// Login with an incorrect password returns 401.
#[tokio::test]
async fn test_login_wrong_password() {
    let store = common::new_store();
    create_test_user(&store, "wrongpw", 1).await;

    let app = common::build_test_app(store);
    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = common::build_test_app(common::new_store());

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[tokio::test]
async fn test_login_inactive_user() {
    let store = common::new_store();
    let user = create_test_user(&store, "inactive", 1).await;
    store
        .deactivate_user(user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(store);
    let body = serde_json::json!({ "username": "inactive", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A valid refresh token returns new tokens, and the refresh token rotates.
#[tokio::test]
async fn test_token_refresh() {
    let store = common::new_store();
    create_test_user(&store, "refresher", 1).await;

    let app = common::build_test_app(store.clone());
    let login_json = login_user(app, "refresher", TEST_PASSWORD).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(store);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string(), "refreshed response must contain access_token");
    assert!(json["refresh_token"].is_string(), "refreshed response must contain refresh_token");
    // Token rotation: the new refresh token must differ from the original.
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );
}

/// A rotated-out refresh token cannot be used a second time.
#[tokio::test]
async fn test_refresh_token_single_use() {
    let store = common::new_store();
    create_test_user(&store, "reuser", 1).await;

    let app = common::build_test_app(store.clone());
    let login_json = login_user(app, "reuser", TEST_PASSWORD).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same token again: the session was revoked on first use.
    let app = common::build_test_app(store);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[tokio::test]
async fn test_refresh_with_invalid_token() {
    let app = common::build_test_app(common::new_store());

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes sessions (204) and the old refresh token stops working.
#[tokio::test]
async fn test_logout_revokes_sessions() {
    let store = common::new_store();
    create_test_user(&store, "logoutuser", 1).await;

    let app = common::build_test_app(store.clone());
    let login_json = login_user(app, "logoutuser", TEST_PASSWORD).await;
    let access_token = login_json["access_token"].as_str().unwrap();
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({});
    let response = post_json_auth(app, "/api/v1/auth/logout", body, access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(store);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Account lockout: after 5 failed login attempts the account is locked.
#[tokio::test]
async fn test_account_lockout() {
    let store = common::new_store();
    create_test_user(&store, "lockme", 1).await;

    // Fail login 5 times with the wrong password to trigger the lock.
    for _ in 0..5 {
        let app = common::build_test_app(store.clone());
        let body = serde_json::json!({ "username": "lockme", "password": "wrong_pass" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The 6th attempt (even with the correct password) should return 403 (locked).
    let app = common::build_test_app(store);
    let body = serde_json::json!({ "username": "lockme", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    let error_msg = json["error"].as_str().unwrap_or("");
    assert!(
        error_msg.contains("locked"),
        "error message should mention the account is locked, got: {error_msg}"
    );
}

// ---------------------------------------------------------------------------
// RBAC enforcement tests
// ---------------------------------------------------------------------------

/// Admin endpoints require authentication -- missing token returns 401.
#[tokio::test]
async fn test_admin_endpoint_requires_auth() {
    let app = common::build_test_app(common::new_store());
    let response = get(app, "/api/v1/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A non-admin user (member, role_id=3) is forbidden from admin endpoints.
#[tokio::test]
async fn test_admin_endpoint_requires_admin_role() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "memberuser", 3).await;

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/admin/users", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Managers (role_id=2) are also forbidden from admin endpoints.
#[tokio::test]
async fn test_admin_endpoint_rejects_manager() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "manageruser", 2).await;

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/admin/roles", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Admin user management tests
// ---------------------------------------------------------------------------

/// Admin can create a new user via POST /admin/users and receives 201.
#[tokio::test]
async fn test_admin_create_user() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "adminmgr", 1).await;

    let app = common::build_test_app(store);
    let new_user_body = serde_json::json!({
        "username": "newuser",
        "email": "newuser@test.com",
        "password": "strong_password_123!",
        "role_id": 2,
        "display_name": "New User"
    });
    let response = post_json_auth(app, "/api/v1/admin/users", new_user_body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newuser");
    assert_eq!(json["email"], "newuser@test.com");
    assert_eq!(json["role"], "manager");
    assert_eq!(json["role_id"], 2);
    assert_eq!(json["display_name"], "New User");
    assert!(json["is_active"].as_bool().unwrap());
}

/// Creating a user with a taken username returns 409.
#[tokio::test]
async fn test_admin_create_user_duplicate_username() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "dupadmin", 1).await;
    create_test_user(&store, "taken", 3).await;

    let app = common::build_test_app(store);
    let body = serde_json::json!({
        "username": "taken",
        "email": "different@test.com",
        "password": "strong_password_123!",
        "role_id": 3,
        "display_name": "Taken"
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// A password below the minimum length is rejected with 400.
#[tokio::test]
async fn test_admin_create_user_short_password() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "pwadmin", 1).await;

    let app = common::build_test_app(store);
    let body = serde_json::json!({
        "username": "shortpw",
        "email": "shortpw@test.com",
        "password": "curta",
        "role_id": 3,
        "display_name": "Short"
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Admin can list users via GET /admin/users.
#[tokio::test]
async fn test_admin_list_users() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "listadmin", 1).await;
    create_test_user(&store, "listuser2", 2).await;

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/admin/users", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().expect("response body should be an array");
    assert!(
        users.len() >= 2,
        "list should contain at least the two created users"
    );
}

/// GET /admin/users/{id} returns the user; unknown id returns 404.
#[tokio::test]
async fn test_admin_get_user() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "getadmin", 1).await;
    let target = create_test_user(&store, "target", 3).await;

    let app = common::build_test_app(store.clone());
    let response = get_auth(app, &format!("/api/v1/admin/users/{}", target.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "target");
    assert_eq!(json["role"], "member");

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/admin/users/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// PUT /admin/users/{id} changes the role, reflected in the response.
#[tokio::test]
async fn test_admin_update_user_role() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "roleadmin", 1).await;
    let target = create_test_user(&store, "promoteme", 3).await;

    let app = common::build_test_app(store);
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", target.id),
        serde_json::json!({ "role_id": 2 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role_id"], 2);
    assert_eq!(json["role"], "manager");
    // Unchanged fields survive the partial update.
    assert_eq!(json["username"], "promoteme");
}

/// Deactivation returns 204 and blocks subsequent logins.
#[tokio::test]
async fn test_admin_deactivate_user() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "deacadmin", 1).await;
    let target = create_test_user(&store, "goner", 3).await;

    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({});
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/deactivate", target.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(store);
    let body = serde_json::json!({ "username": "goner", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Self-deactivation is rejected so an admin cannot lock themselves out.
#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let store = common::new_store();
    let (admin, token) = user_with_token(&store, "selfadmin", 1).await;

    let app = common::build_test_app(store.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/deactivate", admin.id),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Still active: the admin can keep logging in.
    let app = common::build_test_app(store);
    login_user(app, "selfadmin", TEST_PASSWORD).await;
}

/// Password reset swaps the credential and revokes existing sessions.
#[tokio::test]
async fn test_admin_reset_password() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "resetadmin", 1).await;
    let target = create_test_user(&store, "resetme", 3).await;

    // Open a session with the old password first.
    let app = common::build_test_app(store.clone());
    let login_json = login_user(app, "resetme", TEST_PASSWORD).await;
    let old_refresh = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({ "new_password": "brand_new_password_456!" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/users/{}/reset-password", target.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old password no longer works.
    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({ "username": "resetme", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The old refresh token was revoked.
    let app = common::build_test_app(store.clone());
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The new password works.
    let app = common::build_test_app(store);
    login_user(app, "resetme", "brand_new_password_456!").await;
}

/// GET /admin/roles lists the three seeded roles.
#[tokio::test]
async fn test_admin_list_roles() {
    let store = common::new_store();
    let (_admin, token) = user_with_token(&store, "rolesadmin", 1).await;

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/admin/roles", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let roles = json.as_array().expect("response body should be an array");
    assert_eq!(roles.len(), 3);
    let names: Vec<&str> = roles.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["admin", "manager", "member"]);
}

// ---------------------------------------------------------------------------
// Current-user (/me) tests
// ---------------------------------------------------------------------------

/// GET /me returns the caller's own record with profile fields.
#[tokio::test]
async fn test_me_returns_current_user() {
    let store = common::new_store();
    let (user, token) = user_with_token(&store, "selfie", 3).await;

    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["username"], "selfie");
    assert_eq!(json["role"], "member");
    assert_eq!(json["display_name"], "selfie");
}

/// PUT /me/profile updates display data for the caller only.
#[tokio::test]
async fn test_me_update_profile() {
    let store = common::new_store();
    let (_user, token) = user_with_token(&store, "renamer", 3).await;

    let app = common::build_test_app(store.clone());
    let response = put_json_auth(
        app,
        "/api/v1/me/profile",
        serde_json::json!({ "display_name": "Rafaela M.", "phone": "+55 11 99999-0000" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["display_name"], "Rafaela M.");
    assert_eq!(json["phone"], "+55 11 99999-0000");

    // The change is visible through /me.
    let app = common::build_test_app(store);
    let response = get_auth(app, "/api/v1/me", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["display_name"], "Rafaela M.");
}
