//! Slot-based submission handlers.
//!
//! Creation and revision share one endpoint: submitting into an occupied
//! slot rewrites that row with a bumped version. Review decisions move
//! the submission's status; approval additionally promotes the media to
//! a FINAL catalog video.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bom_core::error::CoreError;
use bom_core::submission::{
    authorize_delete, authorize_update, validate_slot, MediaLocator, ReviewAction,
    SubmissionAccess, DEFAULT_MAX_SLOTS,
};
use bom_core::types::Id;
use bom_core::video::VideoStatus;
use bom_db::models::submission::{SubmitRequest, UpdateSubmission};
use bom_db::models::video::{CreateTechnicalSpec, CreateVideo};
use bom_db::repositories::{FeedbackRepo, ProjectRepo, SubmissionRepo, VideoRepo};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Look up a submission together with its authorization context.
async fn load_with_access(
    state: &AppState,
    id: Id,
) -> AppResult<(bom_db::models::submission::Submission, SubmissionAccess)> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;

    let project = ProjectRepo::find_by_id(&state.pool, submission.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: submission.project_id,
        }))?;

    let access = SubmissionAccess {
        submitter_id: submission.user_id,
        project_owner_id: project.owner_id,
    };
    Ok((submission, access))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub project_id: Id,
}

/// GET /api/v1/submissions?project_id=...
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let submissions = SubmissionRepo::list_by_project(&state.pool, params.project_id).await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// GET /api/v1/submissions/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let (submission, _) = load_with_access(&state, id).await?;
    Ok(Json(DataResponse { data: submission }))
}

/// POST /api/v1/submissions
///
/// Submit media into a slot. An empty slot gets version 1; an occupied
/// slot is revised in place (version + 1, status reset to PENDING).
pub async fn submit(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    validate_slot(input.slot, DEFAULT_MAX_SLOTS).map_err(AppError::Core)?;

    let locator = MediaLocator {
        stream_uid: input.stream_uid.clone(),
        r2_key: input.r2_key.clone(),
    };
    locator.validate().map_err(AppError::Core)?;

    // The project must exist before any write.
    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let submission = SubmissionRepo::submit(
        &state.pool,
        input.project_id,
        user.user_id,
        input.slot,
        &locator,
        input.version_title.as_deref(),
    )
    .await?;

    tracing::info!(
        submission_id = %submission.id,
        slot = submission.slot,
        version = submission.version,
        "Submission stored"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

/// PUT /api/v1/submissions/{id}
///
/// Patch metadata. Allowed for the submitter, the project owner, or
/// staff.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdateSubmission>,
) -> AppResult<impl IntoResponse> {
    let (_, access) = load_with_access(&state, id).await?;
    authorize_update(&access, user.user_id, user.role).map_err(AppError::Core)?;

    let updated = SubmissionRepo::update(
        &state.pool,
        id,
        input.version_title.as_deref(),
        input.stream_uid.as_deref(),
        input.r2_key.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Submission",
        id,
    }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/submissions/{id}
///
/// Stricter than update: submitter or admin only, and refused while
/// feedback still references the submission.
pub async fn remove(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let (_, access) = load_with_access(&state, id).await?;
    authorize_delete(&access, user.user_id, user.role).map_err(AppError::Core)?;

    if FeedbackRepo::exists_for_submission(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Submission has feedback and cannot be deleted".into(),
        )));
    }

    SubmissionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
}

/// POST /api/v1/submissions/{id}/review
///
/// Apply a reviewer decision. Approval promotes the submission's media
/// into a FINAL catalog video for the project.
pub async fn review(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let (submission, access) = load_with_access(&state, id).await?;

    // Review is for the project owner and staff, not the submitter.
    if user.user_id != access.project_owner_id && !user.role.is_elevated() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner or staff may review submissions".into(),
        )));
    }

    let status = input.action.resulting_status();
    let updated = SubmissionRepo::set_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;

    if input.action == ReviewAction::Approve {
        let filename = submission
            .r2_key
            .as_deref()
            .map(|k| bom_core::reconcile::file_name(k).to_string())
            .or_else(|| submission.stream_uid.clone())
            .unwrap_or_default();

        let video = VideoRepo::create_with_spec(
            &state.pool,
            submission.project_id,
            &CreateVideo {
                status: Some(VideoStatus::Final.as_str().to_string()),
                version_label: Some(format!("v{}.0", submission.version)),
                completed_at: Some(chrono::Utc::now()),
            },
            &CreateTechnicalSpec {
                filename,
                r2_key: submission.r2_key.clone(),
                file_size: None,
                format: None,
                thumbnail_url: None,
                stream_uid: submission.stream_uid.clone(),
            },
        )
        .await?;
        tracing::info!(
            submission_id = %id,
            video_id = %video.id,
            "Submission approved and promoted to catalog video"
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/submissions/{id}/captions
///
/// Kick off automatic caption generation (Korean) for the submission's
/// stream copy. Fire-and-report — the UI re-triggers on failure.
pub async fn generate_captions(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    let (submission, access) = load_with_access(&state, id).await?;
    authorize_update(&access, user.user_id, user.role).map_err(AppError::Core)?;

    let uid = submission.stream_uid.as_deref().ok_or_else(|| {
        AppError::BadRequest("Submission has no stream copy to caption".into())
    })?;

    let accepted = state.stream.request_caption_generation(uid, "ko").await;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "accepted": accepted }),
    }))
}

/// PUT /api/v1/submissions/{id}/captions/{lang}
///
/// Upload a caption track for the submission's stream copy.
pub async fn upload_captions(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, lang)): Path<(Id, String)>,
    body: axum::body::Bytes,
) -> AppResult<impl IntoResponse> {
    let (submission, access) = load_with_access(&state, id).await?;
    authorize_update(&access, user.user_id, user.role).map_err(AppError::Core)?;

    let uid = submission.stream_uid.as_deref().ok_or_else(|| {
        AppError::BadRequest("Submission has no stream copy to caption".into())
    })?;
    if body.is_empty() {
        return Err(AppError::BadRequest("Caption track body is empty".into()));
    }

    let file_name = format!("{lang}.vtt");
    let accepted = state
        .stream
        .upload_caption_track(uid, &lang, &file_name, body.to_vec())
        .await;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "accepted": accepted }),
    }))
}
