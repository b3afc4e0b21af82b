//! Upload-session orchestration.
//!
//! Attaches ownership and signing policy to every session request before
//! it reaches the provider: the creator tag is always the authenticated
//! user, and signed playback is always required. The returned session
//! endpoint goes back to the browser verbatim — media bytes never pass
//! through this backend.

use std::sync::Arc;

use bom_core::types::Id;
use bom_stream::{StreamClient, StreamError, UploadSessionOptions};

pub struct IngestionCoordinator {
    stream: Arc<StreamClient>,
}

impl IngestionCoordinator {
    pub fn new(stream: Arc<StreamClient>) -> Self {
        Self { stream }
    }

    /// Open a resumable-upload session on behalf of a user.
    ///
    /// No retry on failure: the session endpoint is single-use anyway, so
    /// the caller simply re-requests.
    pub async fn open_session(
        &self,
        owner: Id,
        upload_length: u64,
        watermark: Option<String>,
    ) -> Result<String, StreamError> {
        let options = UploadSessionOptions {
            watermark,
            ..UploadSessionOptions::default()
        };
        let endpoint = self
            .stream
            .create_upload_session(&owner.to_string(), upload_length, &options)
            .await?;

        tracing::info!(owner = %owner, upload_length, "Upload session created");
        Ok(endpoint)
    }
}
