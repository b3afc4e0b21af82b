//! Project entity model and DTOs.

use bom_core::types::{Id, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub status: String,
    pub started_at: Option<Timestamp>,
    pub owner_id: Id,
    pub category_id: Option<Id>,
    pub counselor_id: Option<Id>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub status: Option<String>,
    pub started_at: Option<Timestamp>,
    pub owner_id: Id,
    pub category_id: Option<Id>,
    pub counselor_id: Option<Id>,
}
