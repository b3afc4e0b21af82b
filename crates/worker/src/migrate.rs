//! Blob-to-stream migration job.
//!
//! Specs that still point only at the blob store are handed to the
//! streaming provider one by one: presign a download URL, request a
//! server-side copy, then record the returned uid (and the provider
//! thumbnail where none exists). Encoding completion arrives later via
//! webhook like any other ingestion. Batches are bounded and re-runnable
//! — migrated specs drop out of the eligible set.

use bom_db::repositories::{ProjectRepo, TechnicalSpecRepo, VideoRepo};
use bom_db::DbPool;
use bom_stream::{DeliveryUrls, StreamClient};
use serde::Serialize;

use crate::config::SyncConfig;
use crate::storage::BlobStore;
use crate::JobError;

/// Aggregate counters returned by a migration run.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub eligible: usize,
    pub migrated: usize,
    pub failed: usize,
    pub dry_run: bool,
}

pub struct StreamMigrationJob<'a> {
    pool: &'a DbPool,
    store: &'a BlobStore,
    stream: &'a StreamClient,
    urls: &'a DeliveryUrls,
    config: &'a SyncConfig,
    dry_run: bool,
}

impl<'a> StreamMigrationJob<'a> {
    pub fn new(
        pool: &'a DbPool,
        store: &'a BlobStore,
        stream: &'a StreamClient,
        urls: &'a DeliveryUrls,
        config: &'a SyncConfig,
        dry_run: bool,
    ) -> Self {
        Self {
            pool,
            store,
            stream,
            urls,
            config,
            dry_run,
        }
    }

    /// Run one bounded migration batch.
    pub async fn run(&self) -> Result<MigrationReport, JobError> {
        let specs =
            TechnicalSpecRepo::list_unmigrated(self.pool, self.config.migration_batch_limit)
                .await?;

        let mut report = MigrationReport {
            eligible: specs.len(),
            dry_run: self.dry_run,
            ..Default::default()
        };
        tracing::info!(eligible = report.eligible, dry_run = self.dry_run, "Migration batch starting");

        for spec in specs {
            let Some(key) = spec.r2_key.clone() else {
                continue;
            };

            if self.dry_run {
                tracing::info!(key, video_id = %spec.video_id, "Would copy to stream");
                continue;
            }

            match self.migrate_one(spec.video_id, &key).await {
                Ok(uid) => {
                    report.migrated += 1;
                    tracing::info!(key, uid, "Copy accepted");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(key, error = %e, "Migration failed, continuing");
                }
            }
        }

        Ok(report)
    }

    /// Migrate a single spec; returns the provider uid.
    async fn migrate_one(&self, video_id: bom_core::types::Id, key: &str) -> Result<String, JobError> {
        // Resolve the creator tag from the owning project; fall back to
        // the system account for rows with missing lineage.
        let creator = match VideoRepo::find_by_id(self.pool, video_id).await? {
            Some(video) => ProjectRepo::find_by_id(self.pool, video.project_id)
                .await?
                .map(|p| p.owner_id)
                .unwrap_or(self.config.system_owner_id),
            None => self.config.system_owner_id,
        };

        let source_url = self.store.presign_get(key).await?;
        let uid = self
            .stream
            .copy_from_url(&source_url, key, &creator.to_string())
            .await?;

        let thumbnail = self.urls.thumbnail(&uid);
        TechnicalSpecRepo::set_stream_uid(self.pool, video_id, &uid, Some(&thumbnail)).await?;

        Ok(uid)
    }
}
