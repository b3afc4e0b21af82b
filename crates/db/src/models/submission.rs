//! Submission entity model and DTOs.

use bom_core::types::{Id, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `submissions` table.
///
/// At most one live row exists per `(project_id, slot)`; the unique
/// constraint backs the versioner's revision-in-place contract.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: Id,
    pub project_id: Id,
    pub user_id: Id,
    pub slot: i32,
    pub version: i32,
    /// Review status string; see `bom_core::submission::SubmissionStatus`.
    pub status: String,
    pub version_title: Option<String>,
    pub stream_uid: Option<String>,
    pub r2_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the submit endpoint (create or revise a slot).
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub project_id: Id,
    pub slot: i32,
    pub version_title: Option<String>,
    pub stream_uid: Option<String>,
    pub r2_key: Option<String>,
}

/// DTO for patching submission metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubmission {
    pub version_title: Option<String>,
    pub stream_uid: Option<String>,
    pub r2_key: Option<String>,
}
