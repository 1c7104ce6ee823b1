//! Handlers for the `/assets` resource and the public `/files/{token}`
//! download route.
//!
//! Upload stores the bytes in the file store first and inserts the metadata
//! row second; a failed insert removes the stored object best-effort so the
//! two never drift apart silently. Download URLs are expiring HMAC tokens,
//! never raw storage keys.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

use mqhub_core::error::CoreError;
use mqhub_core::types::DbId;
use mqhub_core::validation::normalize_tags;
use mqhub_db::models::asset::{Asset, AssetFilter, CreateAsset, UpdateAsset};
use mqhub_events::PlatformEvent;
use mqhub_storage::{signing, StorageError};

use crate::error::{AppError, AppResult};
use crate::handlers::SearchQuery;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/assets?collection_id=&campaign_id=&uploaded_by=
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<AssetFilter>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.store.list_assets(&filter).await?;
    Ok(Json(assets))
}

/// GET /api/v1/assets/search?q=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let assets = state.store.search_assets(q).await?;
    Ok(Json(assets))
}

/// POST /api/v1/assets/upload
///
/// Accepts a multipart form with a required `file` field and optional
/// `collection_id`, `campaign_id`, and `tags` (comma-separated) text
/// fields. The bytes go to the file store under a fresh key; the asset
/// row records the original filename and metadata.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let mut file_data: Option<(String, String, Vec<u8>)> = None;
    let mut collection_id: Option<DbId> = None;
    let mut campaign_id: Option<DbId> = None;
    let mut tags: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, content_type, data.to_vec()));
            }
            "collection_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                collection_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("collection_id must be an id".into()))?,
                );
            }
            "campaign_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                campaign_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("campaign_id must be an id".into()))?,
                );
            }
            "tags" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let parts: Vec<String> = text.split(',').map(str::to_string).collect();
                tags = normalize_tags(&parts);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, content_type, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    // Client filenames are display data only; the storage key gets a
    // sanitized copy under a fresh prefix.
    let safe_name = file_name.replace(['/', '\\'], "_");
    let key = format!("assets/{}/{safe_name}", Uuid::new_v4());
    let size_bytes = data.len() as i64;

    state.files.put(&key, data, &content_type).await?;

    let input = CreateAsset {
        file_name,
        file_path: key.clone(),
        content_type,
        size_bytes,
        collection_id,
        campaign_id,
        uploaded_by: Some(user.user_id),
        tags,
    };

    let asset = match state.store.create_asset(&input).await {
        Ok(asset) => asset,
        Err(err) => {
            if let Err(cleanup) = state.files.delete(&key).await {
                tracing::warn!(key, error = %cleanup, "failed to remove orphaned upload");
            }
            return Err(err.into());
        }
    };

    state.event_bus.publish(
        PlatformEvent::entity_change("asset", asset.id, "uploaded")
            .with_actor(user.user_id)
            .with_payload(json!({ "file_name": asset.file_name })),
    );

    Ok((StatusCode::CREATED, Json(asset)))
}

/// GET /api/v1/assets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Asset>> {
    let asset = state
        .store
        .find_asset(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;
    Ok(Json(asset))
}

/// PUT /api/v1/assets/{id}
///
/// Updates metadata only; the stored file is immutable.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    input.validate()?;
    input.tags = input.tags.as_deref().map(normalize_tags);
    let asset = state
        .store
        .update_asset(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    state
        .event_bus
        .publish(PlatformEvent::entity_change("asset", id, "updated").with_actor(user.user_id));

    Ok(Json(asset))
}

/// DELETE /api/v1/assets/{id}
///
/// Removes the metadata row only. The stored object stays in the file
/// store; outstanding download tokens stop resolving once the row is
/// gone.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.store.delete_asset(id).await?;
    if deleted {
        state
            .event_bus
            .publish(PlatformEvent::entity_change("asset", id, "deleted").with_actor(user.user_id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Asset", id }))
    }
}

/// Response body for `GET /assets/{id}/download-url`.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DownloadUrl {
    /// Relative URL the client fetches to receive the file.
    pub url: String,
    /// Unix timestamp (seconds) after which the URL stops working.
    pub expires_at: i64,
}

/// GET /api/v1/assets/{id}/download-url
pub async fn download_url(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DownloadUrl>> {
    let asset = state
        .store
        .find_asset(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Asset", id }))?;

    let expires_at = Utc::now().timestamp() + state.config.storage.download_url_expiry_secs;
    let token = signing::sign_download(
        state.config.storage.signing_secret.as_bytes(),
        &asset.file_path,
        expires_at,
    );

    Ok(Json(DownloadUrl {
        url: format!("/api/v1/files/{token}"),
        expires_at,
    }))
}

/// GET /api/v1/files/{token}
///
/// Redeems a signed download token. Public: the token itself is the
/// credential, so links can be pasted into a browser or an email.
pub async fn download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Response> {
    let verified = signing::verify_download(
        state.config.storage.signing_secret.as_bytes(),
        &token,
        Utc::now().timestamp(),
    )?;

    let asset = state
        .store
        .find_asset_by_path(&verified.key)
        .await?
        .ok_or(AppError::Storage(StorageError::NotFound(verified.key.clone())))?;

    let bytes = state.files.get(&verified.key).await?;

    let headers = [
        (header::CONTENT_TYPE, asset.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", asset.file_name),
        ),
    ];
    Ok((headers, bytes).into_response())
}
