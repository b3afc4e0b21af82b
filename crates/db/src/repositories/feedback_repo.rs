//! Repository for the `feedback` table.

use bom_core::types::Id;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback};

const COLUMNS: &str = "id, submission_id, author_id, start_time, end_time, content, \
    priority, status, compared_side, annotation, created_at, updated_at";

pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a feedback entry anchored to a submission.
    pub async fn create(
        pool: &PgPool,
        submission_id: Id,
        author_id: Id,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback
                (submission_id, author_id, start_time, end_time, content, priority,
                 compared_side, annotation)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'NORMAL'), COALESCE($7, 'A'), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(submission_id)
            .bind(author_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.content)
            .bind(&input.priority)
            .bind(&input.compared_side)
            .bind(&input.annotation)
            .fetch_one(pool)
            .await
    }

    /// Find a feedback entry by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all feedback for a submission, newest first.
    pub async fn list_by_submission(
        pool: &PgPool,
        submission_id: Id,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback
             WHERE submission_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// Author edit of content and/or priority. `created_at` is immutable.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        content: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET
                content = COALESCE($2, content),
                priority = COALESCE($3, priority),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(content)
            .bind(priority)
            .fetch_optional(pool)
            .await
    }

    /// Resolution status transition.
    pub async fn set_status(
        pool: &PgPool,
        id: Id,
        status: &str,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Whether any feedback references the submission.
    pub async fn exists_for_submission(
        pool: &PgPool,
        submission_id: Id,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM feedback WHERE submission_id = $1)")
                .bind(submission_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
