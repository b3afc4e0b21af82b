//! Delivery URL templating.
//!
//! Manifests and thumbnails are served from the delivery domain, with
//! either a signed playback token or (when signing keys are not
//! provisioned) the bare media uid in the path. Builders never fail: an
//! empty credential produces an empty URL so callers can degrade instead
//! of erroring mid-render.

#[derive(Debug, Clone)]
pub struct DeliveryUrls {
    domain: String,
}

impl DeliveryUrls {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// HLS manifest URL for a playback credential (signed token or uid).
    pub fn manifest(&self, credential: &str) -> String {
        if credential.is_empty() {
            return String::new();
        }
        format!("https://{}/{credential}/manifest/video.m3u8", self.domain)
    }

    /// Default thumbnail URL for a playback credential.
    pub fn thumbnail(&self, credential: &str) -> String {
        if credential.is_empty() {
            return String::new();
        }
        format!(
            "https://{}/{credential}/thumbnails/thumbnail.jpg",
            self.domain
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> DeliveryUrls {
        DeliveryUrls::new("videodelivery.net")
    }

    #[test]
    fn manifest_url_contains_credential() {
        assert_eq!(
            urls().manifest("uid-or-token"),
            "https://videodelivery.net/uid-or-token/manifest/video.m3u8"
        );
    }

    #[test]
    fn thumbnail_url_contains_credential() {
        assert_eq!(
            urls().thumbnail("uid-or-token"),
            "https://videodelivery.net/uid-or-token/thumbnails/thumbnail.jpg"
        );
    }

    #[test]
    fn empty_credential_builds_empty_urls() {
        assert_eq!(urls().manifest(""), "");
        assert_eq!(urls().thumbnail(""), "");
    }
}
