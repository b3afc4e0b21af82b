//! Feedback entity model and DTOs.

use bom_core::types::{Id, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: Id,
    pub submission_id: Id,
    pub author_id: Id,
    /// Anchor start in seconds from the beginning of the submission.
    pub start_time: f64,
    /// Optional range end in seconds; `None` for point anchors.
    pub end_time: Option<f64>,
    pub content: String,
    pub priority: String,
    pub status: String,
    /// Which review player (A/B) the entry was authored against.
    pub compared_side: String,
    /// Optional drawn annotation; see `bom_core::annotation::Annotation`.
    pub annotation: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating feedback on a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedback {
    pub start_time: f64,
    pub end_time: Option<f64>,
    pub content: String,
    pub priority: Option<String>,
    pub compared_side: Option<String>,
    pub annotation: Option<serde_json::Value>,
}

/// DTO for author edits to content/priority.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFeedback {
    pub content: Option<String>,
    pub priority: Option<String>,
}
