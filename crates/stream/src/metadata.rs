//! Builder for the resumable-upload `Upload-Metadata` header.
//!
//! The provider's session-creation endpoint takes metadata as
//! comma-joined entries, each either `key base64(value)` or a bare flag
//! key. This is an external wire format; keeping the encoding behind this
//! type keeps the rest of the ingestion path protocol-agnostic.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

#[derive(Debug, Clone, Default)]
pub struct UploadMetadata {
    entries: Vec<String>,
}

impl UploadMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `key base64(value)` entry.
    pub fn pair(mut self, key: &str, value: &str) -> Self {
        self.entries.push(format!("{key} {}", STANDARD.encode(value)));
        self
    }

    /// Append a bare flag key with no value.
    pub fn flag(mut self, key: &str) -> Self {
        self.entries.push(key.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The comma-joined header value.
    pub fn encode(&self) -> String {
        self.entries.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_encodes_value_as_base64() {
        let header = UploadMetadata::new().pair("creator", "user-42").encode();
        let (key, encoded) = header.split_once(' ').unwrap();
        assert_eq!(key, "creator");
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"user-42");
    }

    #[test]
    fn entries_are_comma_joined_in_order() {
        let header = UploadMetadata::new()
            .pair("maxDurationSeconds", "14400")
            .pair("creator", "user-42")
            .flag("requiresignedurls")
            .encode();

        let entries: Vec<&str> = header.split(',').collect();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].starts_with("maxDurationSeconds "));
        assert!(entries[1].starts_with("creator "));
        assert_eq!(entries[2], "requiresignedurls");
    }

    #[test]
    fn flag_has_no_value_part() {
        let header = UploadMetadata::new().flag("requiresignedurls").encode();
        assert_eq!(header, "requiresignedurls");
    }

    #[test]
    fn empty_builder_encodes_empty_header() {
        let metadata = UploadMetadata::new();
        assert!(metadata.is_empty());
        assert_eq!(metadata.encode(), "");
    }

    #[test]
    fn values_with_spaces_survive_the_encoding() {
        let header = UploadMetadata::new().pair("watermark", "profile id 7").encode();
        let (_, encoded) = header.split_once(' ').unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"profile id 7");
    }
}
