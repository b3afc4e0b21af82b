//! Repository for the `projects` table.

use bom_core::types::Id;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};
use crate::models::video::{CreateTechnicalSpec, CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, status, started_at, owner_id, category_id, \
    counselor_id, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, status, started_at, owner_id, category_id, counselor_id)
             VALUES ($1, COALESCE($2, 'IN_PROGRESS'), $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.status)
            .bind(input.started_at)
            .bind(input.owner_id)
            .bind(input.category_id)
            .bind(input.counselor_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create the full project + video + technical-spec triple in one
    /// transaction. Used by the storage sync job when cataloguing an
    /// orphan: the triple either lands together or not at all.
    pub async fn create_with_video(
        pool: &PgPool,
        project: &CreateProject,
        video: &CreateVideo,
        spec: &CreateTechnicalSpec,
    ) -> Result<(Project, Video), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project_query = format!(
            "INSERT INTO projects (title, status, started_at, owner_id, category_id, counselor_id)
             VALUES ($1, COALESCE($2, 'IN_PROGRESS'), $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let created_project = sqlx::query_as::<_, Project>(&project_query)
            .bind(&project.title)
            .bind(&project.status)
            .bind(project.started_at)
            .bind(project.owner_id)
            .bind(project.category_id)
            .bind(project.counselor_id)
            .fetch_one(&mut *tx)
            .await?;

        let created_video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos (project_id, status, version_label, completed_at)
             VALUES ($1, COALESCE($2, 'DRAFT'), COALESCE($3, 'v1.0'), $4)
             RETURNING id, project_id, status, version_label, created_at, completed_at",
        )
        .bind(created_project.id)
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
        .bind(created_video.id)
        .bind(&spec.filename)
        .bind(&spec.r2_key)
        .bind(spec.file_size)
        .bind(&spec.format)
        .bind(&spec.thumbnail_url)
        .bind(&spec.stream_uid)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created_project, created_video))
    }
}
