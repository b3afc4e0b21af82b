//! Category and counselor lookup entities, keyed by unique name.

use bom_core::types::{Id, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub created_at: Timestamp,
}

/// A row from the `counselors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Counselor {
    pub id: Id,
    pub name: String,
    pub created_at: Timestamp,
}
