//! Video and technical-spec entity models and DTOs.

use bom_core::types::{Id, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: Id,
    pub project_id: Id,
    /// Lifecycle status string; see `bom_core::video::VideoStatus`.
    pub status: String,
    pub version_label: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// A row from the `technical_specs` table (1:1 with `videos`).
///
/// Either `r2_key` or `stream_uid` is set; both during migration. The
/// schema enforces this with a check constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechnicalSpec {
    pub video_id: Id,
    pub filename: String,
    pub r2_key: Option<String>,
    pub file_size: Option<i64>,
    pub format: Option<String>,
    pub thumbnail_url: Option<String>,
    pub stream_uid: Option<String>,
    pub duration_secs: Option<f64>,
}

/// DTO for creating a video; the owning project is supplied by the call
/// site (videos are only ever created alongside or under a project).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub status: Option<String>,
    pub version_label: Option<String>,
    pub completed_at: Option<Timestamp>,
}

/// DTO for creating a technical spec alongside its video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTechnicalSpec {
    pub filename: String,
    pub r2_key: Option<String>,
    pub file_size: Option<i64>,
    pub format: Option<String>,
    pub thumbnail_url: Option<String>,
    pub stream_uid: Option<String>,
}
