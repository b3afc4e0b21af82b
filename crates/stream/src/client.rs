//! HTTP client for the streaming provider API.
//!
//! Wraps the provider endpoints with [`reqwest`]: direct-upload session
//! creation, remote-copy ingestion, view analytics, and captions. No
//! retry logic lives here — callers decide whether to re-request.

use serde::Deserialize;

use crate::config::StreamConfig;
use crate::metadata::UploadMetadata;

/// Default cap on uploaded media duration (4 hours).
pub const DEFAULT_MAX_DURATION_SECS: u32 = 14_400;

/// Options attached to an upload session request.
#[derive(Debug, Clone)]
pub struct UploadSessionOptions {
    /// Maximum media duration the provider should accept.
    pub max_duration_secs: u32,
    /// Require signed playback tokens for the resulting media.
    pub require_signed_urls: bool,
    /// Optional watermark profile id to burn in.
    pub watermark: Option<String>,
}

impl Default for UploadSessionOptions {
    fn default() -> Self {
        Self {
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            require_signed_urls: true,
            watermark: None,
        }
    }
}

/// Errors from the provider API layer.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Stream API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A success response was missing an expected field.
    #[error("Malformed Stream API response: {0}")]
    Malformed(&'static str),
}

/// Envelope every JSON endpoint of the provider wraps results in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CopyResult {
    uid: String,
}

#[derive(Debug, Deserialize)]
struct ViewsResult {
    #[serde(default)]
    views: u64,
}

/// HTTP client bound to one provider account.
pub struct StreamClient {
    client: reqwest::Client,
    api_base: String,
    account_id: String,
    api_token: String,
}

impl StreamClient {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across services).
    pub fn with_client(client: reqwest::Client, config: &StreamConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn account_url(&self, suffix: &str) -> String {
        format!(
            "{}/accounts/{}/stream{suffix}",
            self.api_base, self.account_id
        )
    }

    /// Open a resumable-upload session and return the session endpoint.
    ///
    /// Sends `Upload-Length` plus an `Upload-Metadata` header carrying
    /// the duration cap, creator tag, signed-playback flag, and optional
    /// watermark profile. The provider answers with a `Location` header,
    /// which is handed back to the browser verbatim — media bytes go
    /// straight from the client to that endpoint.
    pub async fn create_upload_session(
        &self,
        creator: &str,
        upload_length: u64,
        options: &UploadSessionOptions,
    ) -> Result<String, StreamError> {
        let mut metadata = UploadMetadata::new()
            .pair(
                "maxDurationSeconds",
                &options.max_duration_secs.to_string(),
            )
            .pair("creator", creator);
        if options.require_signed_urls {
            metadata = metadata.flag("requiresignedurls");
        }
        if let Some(profile) = &options.watermark {
            metadata = metadata.pair("watermark", profile);
        }

        let response = self
            .client
            .post(self.account_url("?direct_user=true"))
            .bearer_auth(&self.api_token)
            .header("Tus-Resumable", "1.0.0")
            .header("Upload-Length", upload_length.to_string())
            .header("Upload-Metadata", metadata.encode())
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let location = response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .ok_or(StreamError::Malformed("missing Location header"))?
            .to_string();
        Ok(location)
    }

    /// Ask the provider to ingest media from a URL it can fetch itself
    /// (used when migrating blob-stored masters). Returns the new uid.
    pub async fn copy_from_url(
        &self,
        source_url: &str,
        filename: &str,
        creator: &str,
    ) -> Result<String, StreamError> {
        let body = serde_json::json!({
            "url": source_url,
            "meta": { "name": filename },
            "requireSignedURLs": true,
            "creator": creator,
        });

        let response = self
            .client
            .post(self.account_url("/copy"))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        let envelope: ApiEnvelope<CopyResult> =
            Self::ensure_success(response).await?.json().await?;
        if !envelope.success {
            return Err(StreamError::Malformed("copy request was not successful"));
        }
        envelope
            .result
            .map(|r| r.uid)
            .ok_or(StreamError::Malformed("copy response carried no uid"))
    }

    /// Total view count for a media uid.
    ///
    /// Views are decoration on listing pages — any failure (network,
    /// auth, malformed body) degrades to 0 instead of propagating.
    pub async fn fetch_view_count(&self, uid: &str) -> u64 {
        let url = self.account_url(&format!("/{uid}/analytics/views"));
        let result: Result<ApiEnvelope<ViewsResult>, _> = async {
            self.client
                .get(&url)
                .bearer_auth(&self.api_token)
                .send()
                .await?
                .json()
                .await
        }
        .await;

        match result {
            Ok(envelope) if envelope.success => {
                envelope.result.map(|r| r.views).unwrap_or(0)
            }
            Ok(_) => 0,
            Err(e) => {
                tracing::debug!(uid, error = %e, "View count fetch failed, reporting 0");
                0
            }
        }
    }

    /// Kick off automatic caption generation for a language.
    /// Fire-and-report: returns whether the provider accepted the request.
    pub async fn request_caption_generation(&self, uid: &str, lang: &str) -> bool {
        let url = self.account_url(&format!("/{uid}/captions/{lang}/generate"));
        match self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(uid, lang, error = %e, "Caption generation request failed");
                false
            }
        }
    }

    /// Upload a caption track (e.g. a VTT file) for a language.
    /// Fire-and-report; the caller decides whether to re-trigger.
    pub async fn upload_caption_track(
        &self,
        uid: &str,
        lang: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> bool {
        let part = match reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/vtt")
        {
            Ok(part) => part,
            Err(e) => {
                tracing::warn!(uid, lang, error = %e, "Caption track rejected locally");
                return false;
            }
        };
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.account_url(&format!("/{uid}/captions/{lang}"));
        match self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(uid, lang, error = %e, "Caption track upload failed");
                false
            }
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`StreamError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StreamError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StreamConfig {
        StreamConfig {
            api_base: "https://api.example.com/v4".to_string(),
            account_id: "acct1".to_string(),
            api_token: "token".to_string(),
            delivery_domain: "videodelivery.net".to_string(),
            webhook_secret: None,
            signing_key_id: None,
            signing_key_pem: None,
        }
    }

    #[test]
    fn account_url_embeds_account_id() {
        let client = StreamClient::new(&test_config());
        assert_eq!(
            client.account_url("/copy"),
            "https://api.example.com/v4/accounts/acct1/stream/copy"
        );
        assert_eq!(
            client.account_url("?direct_user=true"),
            "https://api.example.com/v4/accounts/acct1/stream?direct_user=true"
        );
    }

    #[test]
    fn default_options_require_signed_playback() {
        let options = UploadSessionOptions::default();
        assert!(options.require_signed_urls);
        assert_eq!(options.max_duration_secs, DEFAULT_MAX_DURATION_SECS);
        assert!(options.watermark.is_none());
    }

    #[test]
    fn envelope_tolerates_missing_views_field() {
        let envelope: ApiEnvelope<ViewsResult> =
            serde_json::from_str(r#"{"success":true,"result":{}}"#).unwrap();
        assert_eq!(envelope.result.unwrap().views, 0);
    }
}
