//! Blob-storage access over the S3-compatible API.

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use bom_core::reconcile::BlobObject;

use crate::config::StorageConfig;

/// Lifetime of presigned download URLs handed to the provider for
/// remote-copy ingestion.
const PRESIGN_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("Blob listing failed: {0}")]
    List(String),

    #[error("Presigning failed: {0}")]
    Presign(String),
}

/// Handle to one bucket.
pub struct BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl BlobStore {
    /// Build a client for the configured R2 bucket.
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "static",
        );
        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("auto"))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// List every object in the bucket, following continuation tokens.
    pub async fn list_all(&self) -> Result<Vec<BlobObject>, BlobStoreError> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(&self.bucket);
            if let Some(token) = &continuation {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| BlobStoreError::List(e.to_string()))?;

            for object in response.contents() {
                let Some(key) = object.key() else { continue };
                objects.push(BlobObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or(0),
                    last_modified: object.last_modified().and_then(|t| {
                        chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos())
                    }),
                });
            }

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(objects)
    }

    /// Presign a GET URL for a key so the streaming provider can fetch
    /// the object without bucket credentials.
    pub async fn presign_get(&self, key: &str) -> Result<String, BlobStoreError> {
        let presigning = PresigningConfig::expires_in(PRESIGN_TTL)
            .map_err(|e| BlobStoreError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| BlobStoreError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
