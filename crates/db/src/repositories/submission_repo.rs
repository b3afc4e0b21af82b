//! Repository for the `submissions` table.
//!
//! The submit path is where the slot invariant is enforced: the existing
//! row (if any) is read under `FOR UPDATE`, the core planner decides
//! between creation and revision, and the write happens in the same
//! transaction. Two concurrent submits into one slot serialize on the
//! row lock; a racing first-insert is caught by the unique constraint.

use bom_core::submission::{plan_submission, ExistingSlot, MediaLocator};
use bom_core::types::Id;
use sqlx::PgPool;

use crate::models::submission::Submission;

const COLUMNS: &str = "id, project_id, user_id, slot, version, status, version_title, \
    stream_uid, r2_key, created_at, updated_at";

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Find a submission by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's submissions ordered by slot.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Id,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions WHERE project_id = $1 ORDER BY slot"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Submit media into a slot: creates the first version or revises the
    /// occupying row (version + 1, status back to PENDING). At most one
    /// live row per `(project_id, slot)` ever exists.
    pub async fn submit(
        pool: &PgPool,
        project_id: Id,
        user_id: Id,
        slot: i32,
        locator: &MediaLocator,
        version_title: Option<&str>,
    ) -> Result<Submission, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let occupying_query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE project_id = $1 AND slot = $2
             FOR UPDATE"
        );
        let occupying = sqlx::query_as::<_, Submission>(&occupying_query)
            .bind(project_id)
            .bind(slot)
            .fetch_optional(&mut *tx)
            .await?;

        let existing = occupying.as_ref().map(|s| ExistingSlot {
            version: s.version,
            version_title: s.version_title.clone(),
        });
        let write = plan_submission(existing.as_ref(), version_title);

        let submission = if write.is_revision {
            let query = format!(
                "UPDATE submissions SET
                    user_id = $3,
                    version = $4,
                    status = $5,
                    version_title = $6,
                    stream_uid = $7,
                    r2_key = $8,
                    updated_at = NOW()
                 WHERE project_id = $1 AND slot = $2
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Submission>(&query)
                .bind(project_id)
                .bind(slot)
                .bind(user_id)
                .bind(write.version)
                .bind(write.status.as_str())
                .bind(&write.version_title)
                .bind(&locator.stream_uid)
                .bind(&locator.r2_key)
                .fetch_one(&mut *tx)
                .await?
        } else {
            let query = format!(
                "INSERT INTO submissions
                    (project_id, user_id, slot, version, status, version_title, stream_uid, r2_key)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Submission>(&query)
                .bind(project_id)
                .bind(user_id)
                .bind(slot)
                .bind(write.version)
                .bind(write.status.as_str())
                .bind(&write.version_title)
                .bind(&locator.stream_uid)
                .bind(&locator.r2_key)
                .fetch_one(&mut *tx)
                .await?
        };

        tx.commit().await?;
        Ok(submission)
    }

    /// Patch submission metadata. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        version_title: Option<&str>,
        stream_uid: Option<&str>,
        r2_key: Option<&str>,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET
                version_title = COALESCE($2, version_title),
                stream_uid = COALESCE($3, stream_uid),
                r2_key = COALESCE($4, r2_key),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(version_title)
            .bind(stream_uid)
            .bind(r2_key)
            .fetch_optional(pool)
            .await
    }

    /// Set the review status. Returns `None` if no such submission.
    pub async fn set_status(
        pool: &PgPool,
        id: Id,
        status: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a submission. Returns `true` if a row was removed.
    /// Feedback references make this fail with a foreign-key violation,
    /// which is intentional: reviewed work keeps its audit trail.
    pub async fn delete(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
