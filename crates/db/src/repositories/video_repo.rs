//! Repositories for the `videos` and `technical_specs` tables.

use bom_core::types::Id;
use bom_core::video::VideoStatus;
use sqlx::PgPool;

use crate::models::video::{CreateTechnicalSpec, CreateVideo, TechnicalSpec, Video};

const VIDEO_COLUMNS: &str = "id, project_id, status, version_label, created_at, completed_at";

const SPEC_COLUMNS: &str =
    "video_id, filename, r2_key, file_size, format, thumbnail_url, stream_uid, duration_secs";

pub struct VideoRepo;

impl VideoRepo {
    /// Find a video by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Assign a terminal lifecycle status.
    ///
    /// A plain assignment: re-applying the same status is a no-op in
    /// effect, which is what makes duplicate webhook deliveries safe.
    /// `completed_at` is stamped once, on the first transition to FINAL.
    pub async fn set_terminal_status(
        pool: &PgPool,
        id: Id,
        status: VideoStatus,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                status = $2,
                completed_at = CASE
                    WHEN $2 = 'FINAL' THEN COALESCE(completed_at, NOW())
                    ELSE completed_at
                END
             WHERE id = $1
             RETURNING {VIDEO_COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Create a video together with its technical spec in one
    /// transaction. Used by the approval flow: an approved submission
    /// becomes the project's video.
    pub async fn create_with_spec(
        pool: &PgPool,
        project_id: Id,
        video: &CreateVideo,
        spec: &CreateTechnicalSpec,
    ) -> Result<Video, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO videos (project_id, status, version_label, completed_at)
             VALUES ($1, COALESCE($2, 'DRAFT'), COALESCE($3, 'v1.0'), $4)
             RETURNING {VIDEO_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Video>(&query)
            .bind(project_id)
            .bind(&video.status)
            .bind(&video.version_label)
            .bind(video.completed_at)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO technical_specs
                (video_id, filename, r2_key, file_size, format, thumbnail_url, stream_uid)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(created.id)
        .bind(&spec.filename)
        .bind(&spec.r2_key)
        .bind(spec.file_size)
        .bind(&spec.format)
        .bind(&spec.thumbnail_url)
        .bind(&spec.stream_uid)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// The most recent FINAL video for a project, if any.
    pub async fn find_final_for_project(
        pool: &PgPool,
        project_id: Id,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos
             WHERE project_id = $1 AND status = 'FINAL'
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}

pub struct TechnicalSpecRepo;

impl TechnicalSpecRepo {
    /// Find the spec owning a provider stream uid. The webhook consumer's
    /// entry point: an unknown uid means the event is stale or foreign.
    pub async fn find_by_stream_uid(
        pool: &PgPool,
        stream_uid: &str,
    ) -> Result<Option<TechnicalSpec>, sqlx::Error> {
        let query = format!("SELECT {SPEC_COLUMNS} FROM technical_specs WHERE stream_uid = $1");
        sqlx::query_as::<_, TechnicalSpec>(&query)
            .bind(stream_uid)
            .fetch_optional(pool)
            .await
    }

    /// Find the spec for a video.
    pub async fn find_by_video_id(
        pool: &PgPool,
        video_id: Id,
    ) -> Result<Option<TechnicalSpec>, sqlx::Error> {
        let query = format!("SELECT {SPEC_COLUMNS} FROM technical_specs WHERE video_id = $1");
        sqlx::query_as::<_, TechnicalSpec>(&query)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// All blob keys currently catalogued. The sync job diffs the bucket
    /// listing against this set.
    pub async fn list_r2_keys(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT r2_key FROM technical_specs WHERE r2_key IS NOT NULL")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Specs that have a blob key but no thumbnail yet.
    pub async fn list_missing_thumbnails(
        pool: &PgPool,
    ) -> Result<Vec<TechnicalSpec>, sqlx::Error> {
        let query = format!(
            "SELECT {SPEC_COLUMNS} FROM technical_specs
             WHERE thumbnail_url IS NULL AND r2_key IS NOT NULL"
        );
        sqlx::query_as::<_, TechnicalSpec>(&query)
            .fetch_all(pool)
            .await
    }

    /// Backfill a thumbnail URL, only where none is set. Returns `true`
    /// if a row was updated.
    pub async fn backfill_thumbnail(
        pool: &PgPool,
        video_id: Id,
        thumbnail_url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE technical_specs SET thumbnail_url = $2
             WHERE video_id = $1 AND thumbnail_url IS NULL",
        )
        .bind(video_id)
        .bind(thumbnail_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the duration reported by the provider once encoding is done.
    pub async fn set_duration(
        pool: &PgPool,
        video_id: Id,
        duration_secs: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE technical_specs SET duration_secs = $2 WHERE video_id = $1")
            .bind(video_id)
            .bind(duration_secs)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Specs still waiting on migration: blob key present, no stream uid.
    pub async fn list_unmigrated(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TechnicalSpec>, sqlx::Error> {
        let query = format!(
            "SELECT {SPEC_COLUMNS} FROM technical_specs
             WHERE stream_uid IS NULL AND r2_key IS NOT NULL
             ORDER BY video_id
             LIMIT $1"
        );
        sqlx::query_as::<_, TechnicalSpec>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Attach the provider uid (and its thumbnail, when none is set)
    /// after a remote-copy ingestion was accepted.
    pub async fn set_stream_uid(
        pool: &PgPool,
        video_id: Id,
        stream_uid: &str,
        thumbnail_url: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE technical_specs SET
                stream_uid = $2,
                thumbnail_url = COALESCE(thumbnail_url, $3)
             WHERE video_id = $1",
        )
        .bind(video_id)
        .bind(stream_uid)
        .bind(thumbnail_url)
        .execute(pool)
        .await?;
        Ok(())
    }
}
