//! Configuration for the batch jobs.

use bom_core::types::Id;

/// Blob-storage (R2) connection settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint, derived from the provider account id.
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Public CDN base for bucket objects, when one is configured.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Load storage settings from environment variables.
    ///
    /// | Env Var                           | Required | Default              |
    /// |-----------------------------------|----------|----------------------|
    /// | `CLOUDFLARE_ACCOUNT_ID`           | **yes**  | --                   |
    /// | `CLOUDFLARE_R2_ACCESS_KEY_ID`     | **yes**  | --                   |
    /// | `CLOUDFLARE_R2_SECRET_ACCESS_KEY` | **yes**  | --                   |
    /// | `CLOUDFLARE_R2_BUCKET_NAME`       | no       | `hamkkebom-uploads`  |
    /// | `CLOUDFLARE_PUBLIC_URL`           | no       | -- (raw keys stored) |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let account_id = std::env::var("CLOUDFLARE_ACCOUNT_ID")
            .expect("CLOUDFLARE_ACCOUNT_ID must be set in the environment");

        Self {
            endpoint: format!("https://{account_id}.r2.cloudflarestorage.com"),
            access_key_id: std::env::var("CLOUDFLARE_R2_ACCESS_KEY_ID")
                .expect("CLOUDFLARE_R2_ACCESS_KEY_ID must be set in the environment"),
            secret_access_key: std::env::var("CLOUDFLARE_R2_SECRET_ACCESS_KEY")
                .expect("CLOUDFLARE_R2_SECRET_ACCESS_KEY must be set in the environment"),
            bucket: std::env::var("CLOUDFLARE_R2_BUCKET_NAME")
                .unwrap_or_else(|_| "hamkkebom-uploads".into()),
            public_base_url: std::env::var("CLOUDFLARE_PUBLIC_URL").ok(),
        }
    }
}

/// Default cap on specs migrated per run.
const DEFAULT_MIGRATION_BATCH_LIMIT: i64 = 100;

/// Settings for the reconciliation and migration jobs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Account that owns catalog rows created for orphaned media.
    pub system_owner_id: Id,
    /// Maximum specs handled by one migration run.
    pub migration_batch_limit: i64,
}

impl SyncConfig {
    /// Load job settings from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SYNC_OWNER_ID`         | **yes**  | --      |
    /// | `MIGRATION_BATCH_LIMIT` | no       | `100`   |
    ///
    /// # Panics
    ///
    /// Panics if `SYNC_OWNER_ID` is missing or not a UUID.
    pub fn from_env() -> Self {
        let system_owner_id = std::env::var("SYNC_OWNER_ID")
            .expect("SYNC_OWNER_ID must be set in the environment")
            .parse()
            .expect("SYNC_OWNER_ID must be a valid UUID");

        let migration_batch_limit: i64 = std::env::var("MIGRATION_BATCH_LIMIT")
            .unwrap_or_else(|_| DEFAULT_MIGRATION_BATCH_LIMIT.to_string())
            .parse()
            .expect("MIGRATION_BATCH_LIMIT must be a valid i64");

        Self {
            system_owner_id,
            migration_batch_limit,
        }
    }
}
