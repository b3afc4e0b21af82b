//! Feedback anchoring, priorities, and resolution states.
//!
//! Feedback is anchored to a time range within a submission (start, and
//! optionally end, in seconds) and may carry a drawn annotation. The
//! `created_at` audit stamp is immutable; content and priority belong to
//! the author, status transitions to the review team.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a feedback comment.
pub const MAX_FEEDBACK_LENGTH: usize = 5_000;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl FeedbackPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            _ => Err(CoreError::Validation(format!(
                "Invalid feedback priority '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub const ALL: &'static [&'static str] = &["LOW", "NORMAL", "HIGH", "URGENT"];
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackStatus {
    Pending,
    Resolved,
    Wontfix,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Resolved => "RESOLVED",
            Self::Wontfix => "WONTFIX",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "RESOLVED" => Ok(Self::Resolved),
            "WONTFIX" => Ok(Self::Wontfix),
            _ => Err(CoreError::Validation(format!(
                "Invalid feedback status '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub const ALL: &'static [&'static str] = &["PENDING", "RESOLVED", "WONTFIX"];
}

// ---------------------------------------------------------------------------
// Compared side
// ---------------------------------------------------------------------------

/// Which player of the review session a feedback entry was authored
/// against: the current version (A) or the comparison version (B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparedSide {
    A,
    B,
}

impl ComparedSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(CoreError::Validation(format!(
                "Invalid compared side '{s}'. Must be A or B"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Anchor validation
// ---------------------------------------------------------------------------

/// Validate a feedback time anchor.
///
/// `start_time` must be finite and non-negative; when an `end_time` is
/// given it must lie strictly after the start.
pub fn validate_time_range(start_time: f64, end_time: Option<f64>) -> Result<(), CoreError> {
    if !start_time.is_finite() || start_time < 0.0 {
        return Err(CoreError::Validation(format!(
            "start_time must be a non-negative number of seconds, got {start_time}"
        )));
    }
    if let Some(end) = end_time {
        if !end.is_finite() || end <= start_time {
            return Err(CoreError::Validation(format!(
                "end_time ({end}) must be after start_time ({start_time})"
            )));
        }
    }
    Ok(())
}

/// Validate feedback text content.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Feedback content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Feedback content exceeds maximum length of {MAX_FEEDBACK_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trip() {
        for s in FeedbackPriority::ALL {
            assert_eq!(FeedbackPriority::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn priority_unknown_rejected() {
        assert!(FeedbackPriority::from_str("CRITICAL").is_err());
    }

    #[test]
    fn status_round_trip() {
        for s in FeedbackStatus::ALL {
            assert_eq!(FeedbackStatus::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn status_unknown_rejected() {
        assert!(FeedbackStatus::from_str("CLOSED").is_err());
    }

    #[test]
    fn compared_side_round_trip() {
        assert_eq!(ComparedSide::from_str("A").unwrap(), ComparedSide::A);
        assert_eq!(ComparedSide::from_str("B").unwrap(), ComparedSide::B);
        assert!(ComparedSide::from_str("C").is_err());
    }

    #[test]
    fn point_anchor_is_valid() {
        assert!(validate_time_range(32.0, None).is_ok());
        assert!(validate_time_range(0.0, None).is_ok());
    }

    #[test]
    fn range_anchor_must_be_ordered() {
        assert!(validate_time_range(32.0, Some(45.0)).is_ok());
        assert!(validate_time_range(45.0, Some(32.0)).is_err());
        assert!(validate_time_range(45.0, Some(45.0)).is_err());
    }

    #[test]
    fn non_finite_times_rejected() {
        assert!(validate_time_range(f64::NAN, None).is_err());
        assert!(validate_time_range(-1.0, None).is_err());
        assert!(validate_time_range(10.0, Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn content_must_be_non_empty_and_bounded() {
        assert!(validate_content("자막이 가려집니다").is_ok());
        assert!(validate_content("   ").is_err());
        assert!(validate_content(&"x".repeat(MAX_FEEDBACK_LENGTH + 1)).is_err());
    }
}
