//! Blob-storage reconciliation job.
//!
//! Diffs the bucket listing against the catalog and backfills records
//! for orphaned media: parse the legacy filename, upsert the category
//! and counselor lookups, then create the project + video + spec triple
//! owned by the configured system account. One malformed file must never
//! abort the batch — failures are logged per item and counted.

use std::collections::HashSet;

use bom_core::filename::parse_legacy_filename;
use bom_core::reconcile::{file_name, plan_sync, BlobObject, SyncPlan, SyncReport};
use bom_db::models::project::CreateProject;
use bom_db::models::video::{CreateTechnicalSpec, CreateVideo};
use bom_db::repositories::{CategoryRepo, CounselorRepo, ProjectRepo, TechnicalSpecRepo};
use bom_db::DbPool;

use crate::config::SyncConfig;
use crate::storage::BlobStore;
use crate::JobError;

pub struct StorageSyncJob<'a> {
    pool: &'a DbPool,
    store: &'a BlobStore,
    config: &'a SyncConfig,
    public_base_url: Option<String>,
}

impl<'a> StorageSyncJob<'a> {
    pub fn new(
        pool: &'a DbPool,
        store: &'a BlobStore,
        config: &'a SyncConfig,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            pool,
            store,
            config,
            public_base_url,
        }
    }

    /// Run one reconciliation pass and return the aggregate counts.
    pub async fn run(&self) -> Result<SyncReport, JobError> {
        let listing = self.store.list_all().await?;
        let existing: HashSet<String> = TechnicalSpecRepo::list_r2_keys(self.pool)
            .await?
            .into_iter()
            .collect();

        let plan = plan_sync(listing, &existing, self.public_base_url.as_deref());
        tracing::info!(
            total = plan.total_in_storage,
            videos = plan.video_files.len(),
            orphans = plan.orphans.len(),
            "Storage listing planned"
        );

        let updated_thumbnails = self.backfill_thumbnails(&plan).await?;

        let mut new_synced = 0;
        let mut failed = 0;
        for orphan in &plan.orphans {
            match self.catalog_orphan(orphan, &plan).await {
                Ok(()) => new_synced += 1,
                Err(e) => {
                    failed += 1;
                    tracing::warn!(key = %orphan.key, error = %e, "Failed to catalog orphan, continuing");
                }
            }
        }

        let report = SyncReport {
            total_in_storage: plan.total_in_storage,
            video_files: plan.video_files.len(),
            new_synced,
            updated_thumbnails,
            failed,
            orphan_samples: plan.orphan_samples(),
        };
        tracing::info!(
            new_synced = report.new_synced,
            updated_thumbnails = report.updated_thumbnails,
            failed = report.failed,
            "Storage sync finished"
        );
        Ok(report)
    }

    /// Fill in missing spec thumbnails by base-name match against the
    /// image index. Lookup misses and write failures are non-blocking.
    async fn backfill_thumbnails(&self, plan: &SyncPlan) -> Result<usize, JobError> {
        let mut updated = 0;
        for spec in TechnicalSpecRepo::list_missing_thumbnails(self.pool).await? {
            let Some(key) = &spec.r2_key else { continue };
            let Some(url) = plan.thumbnail_for(key) else {
                continue;
            };
            match TechnicalSpecRepo::backfill_thumbnail(self.pool, spec.video_id, url).await {
                Ok(true) => updated += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(video_id = %spec.video_id, error = %e, "Thumbnail backfill failed, continuing");
                }
            }
        }
        Ok(updated)
    }

    /// Create the catalog triple for one orphaned video object.
    async fn catalog_orphan(&self, object: &BlobObject, plan: &SyncPlan) -> Result<(), JobError> {
        let name = file_name(&object.key);
        let meta = parse_legacy_filename(name);

        let category = CategoryRepo::find_or_create(self.pool, &meta.category).await?;
        let counselor = CounselorRepo::find_or_create(self.pool, &meta.counselor).await?;

        let started_at = meta
            .started_at
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());

        let format = name.rsplit('.').next().map(str::to_lowercase);

        ProjectRepo::create_with_video(
            self.pool,
            &CreateProject {
                title: meta.title,
                status: Some("COMPLETED".to_string()),
                started_at,
                owner_id: self.config.system_owner_id,
                category_id: Some(category.id),
                counselor_id: Some(counselor.id),
            },
            &CreateVideo {
                status: Some("FINAL".to_string()),
                version_label: Some(meta.version_label),
                completed_at: started_at,
            },
            &CreateTechnicalSpec {
                filename: name.to_string(),
                r2_key: Some(object.key.clone()),
                file_size: Some(object.size),
                format,
                thumbnail_url: plan.thumbnail_for(&object.key).map(str::to_string),
                stream_uid: None,
            },
        )
        .await?;

        Ok(())
    }
}
