//! Video lifecycle states and the streaming-provider webhook event.
//!
//! The provider reports encoding progress asynchronously; only the two
//! terminal states (`ready`, `error`) drive a catalog write. Intermediate
//! states are informational and carry no ordering guarantee.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Video lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle status of a catalog video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoStatus {
    Draft,
    Final,
    Failed,
}

impl VideoStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Final => "FINAL",
            Self::Failed => "FAILED",
        }
    }

    /// Parse a status string. Returns an error for unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "FINAL" => Ok(Self::Final),
            "FAILED" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid video status '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &["DRAFT", "FINAL", "FAILED"];
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Provider stream states
// ---------------------------------------------------------------------------

/// Encoding state reported by the streaming provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Queued,
    Downloading,
    Encoding,
    Ready,
    Error,
}

impl StreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Downloading => "downloading",
            Self::Encoding => "encoding",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }

    /// Parse a provider state string. Returns `None` for states this
    /// backend does not know about (they are logged and ignored upstream).
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(Self::Queued),
            "downloading" => Some(Self::Downloading),
            "encoding" => Some(Self::Encoding),
            "ready" => Some(Self::Ready),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Map a stream state to the catalog status it finalizes, if any.
    ///
    /// Only `ready` and `error` are terminal. Applying the result is a
    /// plain assignment, so duplicate or out-of-order deliveries converge
    /// on the same catalog state.
    pub fn terminal_status(&self) -> Option<VideoStatus> {
        match self {
            Self::Ready => Some(VideoStatus::Final),
            Self::Error => Some(VideoStatus::Failed),
            _ => None,
        }
    }

    /// All valid state values.
    pub const ALL: &'static [&'static str] =
        &["queued", "downloading", "encoding", "ready", "error"];
}

impl std::fmt::Display for StreamState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Webhook event payload
// ---------------------------------------------------------------------------

/// Deserialized webhook body: `{uid, status: {state}, duration}`.
///
/// Ephemeral — never persisted. Delivery is at-least-once, so every
/// consumer effect must be idempotent.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Opaque media id assigned by the provider.
    pub uid: String,
    pub status: WebhookStatus,
    /// Reported duration in seconds, present once encoding finishes.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookStatus {
    pub state: String,
}

impl WebhookEvent {
    /// Parse the raw JSON body of a webhook delivery.
    pub fn from_json(raw: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(raw)
            .map_err(|e| CoreError::Validation(format!("Malformed webhook payload: {e}")))
    }

    /// The reported state, if it is one this backend understands.
    pub fn stream_state(&self) -> Option<StreamState> {
        StreamState::from_str(&self.status.state)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- VideoStatus ---------------------------------------------------------

    #[test]
    fn video_status_round_trip() {
        for s in VideoStatus::ALL {
            let status = VideoStatus::from_str(s).unwrap();
            assert_eq!(status.as_str(), *s);
        }
    }

    #[test]
    fn video_status_unknown_rejected() {
        assert!(VideoStatus::from_str("PUBLISHED").is_err());
    }

    #[test]
    fn video_status_display_matches_as_str() {
        assert_eq!(format!("{}", VideoStatus::Final), "FINAL");
    }

    // -- StreamState ---------------------------------------------------------

    #[test]
    fn stream_state_round_trip() {
        for s in StreamState::ALL {
            let state = StreamState::from_str(s).unwrap();
            assert_eq!(state.as_str(), *s);
        }
    }

    #[test]
    fn stream_state_unknown_returns_none() {
        assert!(StreamState::from_str("pendingupload").is_none());
        assert!(StreamState::from_str("").is_none());
    }

    #[test]
    fn ready_maps_to_final() {
        assert_eq!(
            StreamState::Ready.terminal_status(),
            Some(VideoStatus::Final)
        );
    }

    #[test]
    fn error_maps_to_failed() {
        assert_eq!(
            StreamState::Error.terminal_status(),
            Some(VideoStatus::Failed)
        );
    }

    #[test]
    fn intermediate_states_are_not_terminal() {
        assert_eq!(StreamState::Queued.terminal_status(), None);
        assert_eq!(StreamState::Downloading.terminal_status(), None);
        assert_eq!(StreamState::Encoding.terminal_status(), None);
    }

    /// Applying the same terminal event twice must converge on one status.
    #[test]
    fn terminal_mapping_is_idempotent() {
        let first = StreamState::Ready.terminal_status();
        let second = StreamState::Ready.terminal_status();
        assert_eq!(first, second);
    }

    // -- WebhookEvent --------------------------------------------------------

    #[test]
    fn webhook_event_parses_full_payload() {
        let raw = br#"{"uid":"abc123","status":{"state":"ready"},"duration":42.5}"#;
        let event = WebhookEvent::from_json(raw).unwrap();
        assert_eq!(event.uid, "abc123");
        assert_eq!(event.stream_state(), Some(StreamState::Ready));
        assert_eq!(event.duration, Some(42.5));
    }

    #[test]
    fn webhook_event_duration_optional() {
        let raw = br#"{"uid":"abc123","status":{"state":"queued"}}"#;
        let event = WebhookEvent::from_json(raw).unwrap();
        assert_eq!(event.duration, None);
    }

    #[test]
    fn webhook_event_unknown_state_tolerated() {
        let raw = br#"{"uid":"abc123","status":{"state":"inspecting"}}"#;
        let event = WebhookEvent::from_json(raw).unwrap();
        assert_eq!(event.stream_state(), None);
    }

    #[test]
    fn webhook_event_malformed_body_rejected() {
        assert!(WebhookEvent::from_json(b"not json").is_err());
        assert!(WebhookEvent::from_json(br#"{"uid":"x"}"#).is_err());
    }
}
