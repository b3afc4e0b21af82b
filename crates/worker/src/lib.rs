//! Batch jobs for the video catalog.
//!
//! Two jobs live here, both safe to run on a schedule or on demand
//! without coordination:
//!
//! - [`sync::StorageSyncJob`] reconciles the blob-storage bucket against
//!   the catalog, backfilling records for orphaned media.
//! - [`migrate::StreamMigrationJob`] moves blob-stored masters into the
//!   streaming provider via server-side remote copy.
//!
//! Repeated runs converge; per-item failures are isolated and counted.

pub mod config;
pub mod migrate;
pub mod storage;
pub mod sync;

/// Errors shared by the batch jobs.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Blob storage error: {0}")]
    Storage(#[from] storage::BlobStoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stream API error: {0}")]
    Stream(#[from] bom_stream::StreamError),
}
