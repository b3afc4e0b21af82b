//! Timestamp-anchored feedback handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bom_core::annotation::Annotation;
use bom_core::error::CoreError;
use bom_core::feedback::{
    validate_content, validate_time_range, ComparedSide, FeedbackPriority, FeedbackStatus,
};
use bom_core::types::Id;
use bom_db::models::feedback::{CreateFeedback, UpdateFeedback};
use bom_db::repositories::{FeedbackRepo, SubmissionRepo};
use serde::Deserialize;

use crate::auth::{AuthUser, RequireElevated};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate the embedded annotation JSON, if any.
fn validate_annotation(value: &Option<serde_json::Value>) -> Result<(), AppError> {
    let Some(value) = value else { return Ok(()) };
    let annotation: Annotation = serde_json::from_value(value.clone())
        .map_err(|e| AppError::BadRequest(format!("Malformed annotation: {e}")))?;
    annotation.validate().map_err(AppError::Core)
}

/// GET /api/v1/submissions/{id}/feedback
pub async fn list_for_submission(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<Id>,
) -> AppResult<impl IntoResponse> {
    SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id: submission_id,
        }))?;

    let feedback = FeedbackRepo::list_by_submission(&state.pool, submission_id).await?;
    Ok(Json(DataResponse { data: feedback }))
}

/// POST /api/v1/submissions/{id}/feedback
///
/// Any authenticated reviewer may leave feedback; the anchor, priority,
/// compared side, and optional annotation geometry are all validated
/// before the write.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<Id>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<impl IntoResponse> {
    SubmissionRepo::find_by_id(&state.pool, submission_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id: submission_id,
        }))?;

    validate_time_range(input.start_time, input.end_time).map_err(AppError::Core)?;
    validate_content(&input.content).map_err(AppError::Core)?;
    if let Some(priority) = &input.priority {
        FeedbackPriority::from_str(priority).map_err(AppError::Core)?;
    }
    if let Some(side) = &input.compared_side {
        ComparedSide::from_str(side).map_err(AppError::Core)?;
    }
    validate_annotation(&input.annotation)?;

    let feedback = FeedbackRepo::create(&state.pool, submission_id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// PUT /api/v1/feedback/{id}
///
/// Content and priority belong to the author alone.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdateFeedback>,
) -> AppResult<impl IntoResponse> {
    let feedback = FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }))?;

    if feedback.author_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may edit feedback".into(),
        )));
    }

    if let Some(content) = &input.content {
        validate_content(content).map_err(AppError::Core)?;
    }
    if let Some(priority) = &input.priority {
        FeedbackPriority::from_str(priority).map_err(AppError::Core)?;
    }

    let updated = FeedbackRepo::update(
        &state.pool,
        id,
        input.content.as_deref(),
        input.priority.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Feedback",
        id,
    }))?;

    Ok(Json(DataResponse { data: updated }))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// PUT /api/v1/feedback/{id}/status
///
/// Resolution transitions are a review-team action.
pub async fn set_status(
    RequireElevated(_user): RequireElevated,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = FeedbackStatus::from_str(&input.status).map_err(AppError::Core)?;

    let updated = FeedbackRepo::set_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}
