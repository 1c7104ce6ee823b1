//! HTTP-level integration tests for the asset library: multipart upload,
//! metadata CRUD, and the signed download-URL flow.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use common::{
    body_json, delete_auth, get, get_auth, put_json_auth, user_with_token, TEST_SIGNING_SECRET,
};
use http_body_util::BodyExt;
use mqhub_db::store::MemStore;
use mqhub_storage::{signing, FileStore, LocalStore};
use serde_json::json;
use tower::ServiceExt;

const BOUNDARY: &str = "mqhubtestboundary7431";

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// Assemble a `multipart/form-data` body with an optional file part and
/// any number of plain text fields.
fn multipart_body(file: Option<(&str, &str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(app: Router, uri: &str, body: Vec<u8>, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri).header(
        CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Fresh per-test file store rooted in a temp directory. The `TempDir`
/// guard must stay alive for the duration of the test.
fn file_store(dir: &tempfile::TempDir) -> Arc<dyn FileStore> {
    Arc::new(LocalStore::new(dir.path()))
}

/// True when no regular file remains anywhere under `root`. Empty
/// directories left behind by object cleanup do not count.
fn no_files_under(root: &std::path::Path) -> bool {
    let Ok(entries) = std::fs::read_dir(root) else {
        return true;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if !no_files_under(&path) {
                return false;
            }
        } else {
            return false;
        }
    }
    true
}

async fn upload(
    store: &Arc<MemStore>,
    files: &Arc<dyn FileStore>,
    token: &str,
    file: (&str, &str, &[u8]),
    fields: &[(&str, &str)],
) -> serde_json::Value {
    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let body = multipart_body(Some(file), fields);
    let response = post_multipart(app, "/api/v1/assets/upload", body, Some(token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_upload_asset() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (user, token) = user_with_token(&store, "upload1", 2).await;

    let data = b"fake jpeg bytes".as_slice();
    let asset = upload(
        &store,
        &files,
        &token,
        ("hero.jpg", "image/jpeg", data),
        &[("tags", "verao, drop01")],
    )
    .await;

    assert_eq!(asset["file_name"], "hero.jpg");
    assert_eq!(asset["content_type"], "image/jpeg");
    assert_eq!(asset["size_bytes"], data.len() as i64);
    assert_eq!(asset["uploaded_by"], user.id);
    assert_eq!(asset["tags"], json!(["verao", "drop01"]));
    let path = asset["file_path"].as_str().unwrap();
    assert!(path.starts_with("assets/"), "storage key under assets/, got {path}");
    assert!(path.ends_with("hero.jpg"));
}

#[tokio::test]
async fn test_upload_with_collection_reference() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "upload2", 2).await;

    // The collection the asset belongs to.
    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = common::post_json_auth(
        app,
        "/api/v1/collections",
        json!({ "name": "Verao 2026" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let collection = body_json(response).await;
    let cid = collection["id"].as_i64().unwrap();

    let asset = upload(
        &store,
        &files,
        &token,
        ("look01.png", "image/png", b"png"),
        &[("collection_id", &cid.to_string())],
    )
    .await;

    assert_eq!(asset["collection_id"], cid);
}

#[tokio::test]
async fn test_upload_without_file_field_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "upload3", 2).await;

    let app = common::build_test_app_with_files(store, files);
    let body = multipart_body(None, &[("tags", "solto")]);
    let response = post_multipart(app, "/api/v1/assets/upload", body, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "Missing required 'file' field");
}

#[tokio::test]
async fn test_upload_non_numeric_collection_id_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "upload4", 2).await;

    let app = common::build_test_app_with_files(store, files);
    let body = multipart_body(
        Some(("a.png", "image/png", b"png")),
        &[("collection_id", "not-a-number")],
    );
    let response = post_multipart(app, "/api/v1/assets/upload", body, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "collection_id must be an id");
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);

    let app = common::build_test_app_with_files(store, files);
    let body = multipart_body(Some(("a.png", "image/png", b"png")), &[]);
    let response = post_multipart(app, "/api/v1/assets/upload", body, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_failed_metadata_insert_cleans_up_stored_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "upload5", 2).await;

    store.fail_next_asset_insert();
    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let body = multipart_body(Some(("ghost.png", "image/png", b"png")), &[]);
    let response = post_multipart(app, "/api/v1/assets/upload", body, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // No metadata row survived.
    let app = common::build_test_app_with_files(store, files);
    let response = get_auth(app, "/api/v1/assets", &token).await;
    assert_eq!(body_json(response).await, json!([]));

    // The stored bytes were removed along with it.
    assert!(no_files_under(dir.path()), "orphaned upload left on disk");
}

// ---------------------------------------------------------------------------
// Listing, search, and metadata updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_assets_with_collection_filter() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "lister", 2).await;

    upload(&store, &files, &token, ("a.png", "image/png", b"a"), &[]).await;
    upload(
        &store,
        &files,
        &token,
        ("b.png", "image/png", b"b"),
        &[("collection_id", "42")],
    )
    .await;

    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = get_auth(app, "/api/v1/assets", &token).await;
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let app = common::build_test_app_with_files(store, files);
    let response = get_auth(app, "/api/v1/assets?collection_id=42", &token).await;
    let filtered = body_json(response).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["file_name"], "b.png");
}

#[tokio::test]
async fn test_search_assets_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "searcher", 2).await;

    upload(&store, &files, &token, ("Lookbook-Final.pdf", "application/pdf", b"pdf"), &[]).await;
    upload(&store, &files, &token, ("banner.png", "image/png", b"png"), &[]).await;

    let app = common::build_test_app_with_files(store, files);
    let response = get_auth(app, "/api/v1/assets/search?q=lookbook", &token).await;
    let results = body_json(response).await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["file_name"], "Lookbook-Final.pdf");
}

#[tokio::test]
async fn test_update_asset_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "editor", 2).await;

    let asset = upload(&store, &files, &token, ("raw.png", "image/png", b"png"), &[]).await;
    let id = asset["id"].as_i64().unwrap();
    let original_path = asset["file_path"].as_str().unwrap().to_string();

    let app = common::build_test_app_with_files(store, files);
    let response = put_json_auth(
        app,
        &format!("/api/v1/assets/{id}"),
        json!({ "file_name": "hero-final.png", "tags": ["aprovado"] }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["file_name"], "hero-final.png");
    assert_eq!(updated["tags"], json!(["aprovado"]));
    // The stored object is immutable; its key does not change.
    assert_eq!(updated["file_path"], original_path.as_str());
}

// ---------------------------------------------------------------------------
// Signed downloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_download_url_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "downloader", 2).await;

    let data = b"conteudo do lookbook".as_slice();
    let asset = upload(&store, &files, &token, ("lookbook.pdf", "application/pdf", data), &[]).await;
    let id = asset["id"].as_i64().unwrap();

    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{id}/download-url"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let grant = body_json(response).await;
    let url = grant["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/api/v1/files/"));
    assert!(grant["expires_at"].as_i64().unwrap() > Utc::now().timestamp());

    // Redeeming is public: no Authorization header.
    let app = common::build_test_app_with_files(store, files);
    let response = get(app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"lookbook.pdf\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), data);
}

#[tokio::test]
async fn test_delete_asset_invalidates_download_links() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::new_store();
    let files = file_store(&dir);
    let (_user, token) = user_with_token(&store, "deleter", 2).await;

    let asset = upload(&store, &files, &token, ("tmp.png", "image/png", b"png"), &[]).await;
    let id = asset["id"].as_i64().unwrap();

    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{id}/download-url"), &token).await;
    let grant = body_json(response).await;
    let url = grant["url"].as_str().unwrap().to_string();

    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = delete_auth(app, &format!("/api/v1/assets/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app_with_files(store.clone(), files.clone());
    let response = get_auth(app, &format!("/api/v1/assets/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The token still verifies but its row is gone.
    let app = common::build_test_app_with_files(store, files);
    let response = get(app, &url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_with_expired_token() {
    let store = common::new_store();

    let expired = signing::sign_download(
        TEST_SIGNING_SECRET.as_bytes(),
        "assets/someprefix/file.bin",
        Utc::now().timestamp() - 60,
    );

    let app = common::build_test_app(store);
    let response = get(app, &format!("/api/v1/files/{expired}")).await;

    assert_eq!(response.status(), StatusCode::GONE);
    let error = body_json(response).await;
    assert_eq!(error["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_download_with_garbage_token() {
    let app = common::build_test_app(common::new_store());
    let response = get(app, "/api/v1/files/not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let error = body_json(response).await;
    assert_eq!(error["code"], "FORBIDDEN");
}
