//! Upload-session handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUploadSession {
    /// Total upload size in bytes (the resumable protocol's
    /// `Upload-Length`).
    pub upload_length: u64,
    /// Optional watermark profile id to apply during encoding.
    pub watermark: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadSession {
    /// Resumable session endpoint; the client streams bytes there
    /// directly.
    pub upload_url: String,
}

/// POST /api/v1/uploads/sessions
///
/// Opens a resumable-upload session with the provider on behalf of the
/// authenticated user and returns its endpoint.
pub async fn create_session(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUploadSession>,
) -> AppResult<impl IntoResponse> {
    if input.upload_length == 0 {
        return Err(AppError::BadRequest("upload_length must be positive".into()));
    }

    let upload_url = state
        .coordinator
        .open_session(user.user_id, input.upload_length, input.watermark)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadSession { upload_url },
        }),
    ))
}
