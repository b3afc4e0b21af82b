//! Video playback and catalog maintenance handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use bom_core::error::CoreError;
use bom_core::types::Id;
use bom_db::repositories::{TechnicalSpecRepo, VideoRepo};
use bom_worker::storage::BlobStore;
use bom_worker::sync::StorageSyncJob;
use serde::Serialize;

use crate::auth::RequireElevated;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything a player needs to render one video.
#[derive(Debug, Serialize)]
pub struct PlaybackInfo {
    pub video_id: Id,
    pub status: String,
    pub version_label: String,
    /// HLS manifest URL; empty when the media has no stream copy yet.
    pub manifest_url: String,
    pub thumbnail_url: Option<String>,
    /// Whether the manifest carries a signed playback token.
    pub signed: bool,
    /// Best-effort provider view count; 0 on any analytics failure.
    pub views: u64,
    pub duration_secs: Option<f64>,
    /// Blob key for legacy media still played from storage.
    pub r2_key: Option<String>,
}

/// GET /api/v1/videos/{id}/playback
///
/// Resolves the spec, issues a signed playback token when keys are
/// provisioned, and falls back to unsigned uid-based URLs otherwise.
pub async fn get_playback(
    State(state): State<AppState>,
    Path(video_id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let video = VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    let spec = TechnicalSpecRepo::find_by_video_id(&state.pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TechnicalSpec",
            id: video_id,
        }))?;

    let (manifest_url, signed, views) = match &spec.stream_uid {
        Some(uid) => {
            let token = state.signer.issue(uid);
            // Fail-open: no signing key provisioned means unsigned
            // playback with the bare uid as credential.
            let (credential, signed) = if token.is_empty() {
                (uid.as_str(), false)
            } else {
                (token.as_str(), true)
            };
            let manifest = state.urls.manifest(credential);
            let views = state.stream.fetch_view_count(uid).await;
            (manifest, signed, views)
        }
        // Legacy blob-only media: the client plays from storage.
        None => (String::new(), false, 0),
    };

    Ok(Json(DataResponse {
        data: PlaybackInfo {
            video_id: video.id,
            status: video.status,
            version_label: video.version_label,
            manifest_url,
            thumbnail_url: spec.thumbnail_url,
            signed,
            views,
            duration_secs: spec.duration_secs,
            r2_key: spec.r2_key,
        },
    }))
}

/// POST /api/v1/videos/sync
///
/// Runs the blob-storage reconciliation on demand and returns the
/// aggregate report. Staff only.
pub async fn run_storage_sync(
    RequireElevated(user): RequireElevated,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (Some(storage), Some(sync)) = (&state.config.storage, &state.config.sync_job) else {
        return Err(AppError::InternalError(
            "Blob storage credentials are not configured".into(),
        ));
    };

    let store = BlobStore::new(storage);
    let job = StorageSyncJob::new(
        &state.pool,
        &store,
        sync,
        storage.public_base_url.clone(),
    );
    let report = job
        .run()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(
        user_id = %user.user_id,
        new_synced = report.new_synced,
        "On-demand storage sync finished"
    );
    Ok(Json(DataResponse { data: report }))
}
