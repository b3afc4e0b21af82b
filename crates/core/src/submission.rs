//! Slot-based submission versioning rules.
//!
//! An assignment exposes a fixed number of creative slots (version 1..N
//! in the UI). Each slot holds at most one live submission: uploading
//! into an occupied slot is a *revision* — the existing row is rewritten
//! with a bumped version and its review status reset — never a second
//! row. The decision of what to write is pure and lives here; the
//! repository applies it transactionally.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::Id;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of creative slots per assignment.
pub const DEFAULT_MAX_SLOTS: i32 = 5;

// ---------------------------------------------------------------------------
// Review status
// ---------------------------------------------------------------------------

/// Review status of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
    Revised,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Revised => "REVISED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_REVIEW" => Ok(Self::InReview),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "REVISED" => Ok(Self::Revised),
            _ => Err(CoreError::Validation(format!(
                "Invalid submission status '{s}'. Must be one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub const ALL: &'static [&'static str] =
        &["PENDING", "IN_REVIEW", "APPROVED", "REJECTED", "REVISED"];
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Media locator
// ---------------------------------------------------------------------------

/// Where a submission's media lives: the streaming provider, the blob
/// store, or (mid-migration) both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaLocator {
    pub stream_uid: Option<String>,
    pub r2_key: Option<String>,
}

impl MediaLocator {
    /// A locator must point somewhere — fully empty is invalid.
    pub fn validate(&self) -> Result<(), CoreError> {
        let has_stream = self.stream_uid.as_deref().is_some_and(|s| !s.is_empty());
        let has_blob = self.r2_key.as_deref().is_some_and(|s| !s.is_empty());
        if !has_stream && !has_blob {
            return Err(CoreError::Validation(
                "Media locator must carry a stream uid or a blob key".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Slot validation
// ---------------------------------------------------------------------------

/// Validate that a slot index is within `1..=max_slots`.
pub fn validate_slot(slot: i32, max_slots: i32) -> Result<(), CoreError> {
    if slot < 1 || slot > max_slots {
        return Err(CoreError::Validation(format!(
            "Slot {slot} out of range. Must be between 1 and {max_slots}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Submission planning
// ---------------------------------------------------------------------------

/// The live row currently occupying a slot, if any.
#[derive(Debug, Clone)]
pub struct ExistingSlot {
    pub version: i32,
    pub version_title: Option<String>,
}

/// What the repository should write for a submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionWrite {
    /// `true` = rewrite the occupying row; `false` = insert a new one.
    pub is_revision: bool,
    pub version: i32,
    pub status: SubmissionStatus,
    pub version_title: Option<String>,
}

/// Decide between the creation and revision paths for a slot.
///
/// A revision bumps the version, forces the status back to `PENDING`
/// (re-review), and keeps the previous version title when the new one is
/// blank. First-time submissions start at version 1.
pub fn plan_submission(
    existing: Option<&ExistingSlot>,
    new_title: Option<&str>,
) -> SubmissionWrite {
    let title = new_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match existing {
        Some(current) => SubmissionWrite {
            is_revision: true,
            version: current.version + 1,
            status: SubmissionStatus::Pending,
            version_title: title.or_else(|| current.version_title.clone()),
        },
        None => SubmissionWrite {
            is_revision: false,
            version: 1,
            status: SubmissionStatus::Pending,
            version_title: title,
        },
    }
}

// ---------------------------------------------------------------------------
// Review actions
// ---------------------------------------------------------------------------

/// A reviewer decision on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    RequestRevision,
    Reject,
}

impl ReviewAction {
    /// The submission status this action transitions to.
    pub fn resulting_status(&self) -> SubmissionStatus {
        match self {
            Self::Approve => SubmissionStatus::Approved,
            Self::RequestRevision => SubmissionStatus::Revised,
            Self::Reject => SubmissionStatus::Rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Ownership context for a submission mutation.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionAccess {
    pub submitter_id: Id,
    pub project_owner_id: Id,
}

/// Updates are allowed for the submitter, the owning project's owner, or
/// any elevated role. No partial mutation happens on rejection.
pub fn authorize_update(
    access: &SubmissionAccess,
    caller: Id,
    role: Role,
) -> Result<(), CoreError> {
    if caller == access.submitter_id || caller == access.project_owner_id || role.is_elevated() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the submitter, the project owner, or staff may modify a submission".to_string(),
        ))
    }
}

/// Deletion is stricter than update: submitter or platform admin only.
pub fn authorize_delete(
    access: &SubmissionAccess,
    caller: Id,
    role: Role,
) -> Result<(), CoreError> {
    if caller == access.submitter_id || role.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the submitter or an admin may delete a submission".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    // -- SubmissionStatus --------------------------------------------------

    #[test]
    fn status_round_trip() {
        for s in SubmissionStatus::ALL {
            let status = SubmissionStatus::from_str(s).unwrap();
            assert_eq!(status.as_str(), *s);
        }
    }

    #[test]
    fn status_unknown_rejected() {
        assert!(SubmissionStatus::from_str("DRAFT").is_err());
    }

    // -- MediaLocator ------------------------------------------------------

    #[test]
    fn locator_with_stream_uid_valid() {
        let locator = MediaLocator {
            stream_uid: Some("uid1".to_string()),
            r2_key: None,
        };
        assert!(locator.validate().is_ok());
    }

    #[test]
    fn locator_with_blob_key_valid() {
        let locator = MediaLocator {
            stream_uid: None,
            r2_key: Some("uploads/a.mp4".to_string()),
        };
        assert!(locator.validate().is_ok());
    }

    #[test]
    fn hybrid_locator_valid() {
        let locator = MediaLocator {
            stream_uid: Some("uid1".to_string()),
            r2_key: Some("uploads/a.mp4".to_string()),
        };
        assert!(locator.validate().is_ok());
    }

    #[test]
    fn empty_locator_rejected() {
        assert!(MediaLocator::default().validate().is_err());
        let blank = MediaLocator {
            stream_uid: Some(String::new()),
            r2_key: Some(String::new()),
        };
        assert!(blank.validate().is_err());
    }

    // -- validate_slot -----------------------------------------------------

    #[test]
    fn slot_bounds() {
        assert!(validate_slot(1, DEFAULT_MAX_SLOTS).is_ok());
        assert!(validate_slot(5, DEFAULT_MAX_SLOTS).is_ok());
        assert!(validate_slot(0, DEFAULT_MAX_SLOTS).is_err());
        assert!(validate_slot(6, DEFAULT_MAX_SLOTS).is_err());
        assert!(validate_slot(-1, DEFAULT_MAX_SLOTS).is_err());
    }

    #[test]
    fn slot_bounds_follow_configured_max() {
        assert!(validate_slot(7, 10).is_ok());
        assert!(validate_slot(7, 5).is_err());
    }

    // -- plan_submission ---------------------------------------------------

    #[test]
    fn first_submission_creates_version_one() {
        let write = plan_submission(None, Some("경쾌한 톤"));
        assert!(!write.is_revision);
        assert_eq!(write.version, 1);
        assert_eq!(write.status, SubmissionStatus::Pending);
        assert_eq!(write.version_title.as_deref(), Some("경쾌한 톤"));
    }

    #[test]
    fn occupied_slot_revises_instead_of_creating() {
        let current = ExistingSlot {
            version: 1,
            version_title: Some("경쾌한 톤".to_string()),
        };
        let write = plan_submission(Some(&current), None);
        assert!(write.is_revision);
        assert_eq!(write.version, 2);
        assert_eq!(write.status, SubmissionStatus::Pending);
    }

    /// Repeated submits into one slot only ever rewrite — version grows,
    /// no second row is planned.
    #[test]
    fn repeated_submits_never_create_rows() {
        let mut slot: Option<ExistingSlot> = None;
        for expected_version in 1..=4 {
            let write = plan_submission(slot.as_ref(), None);
            assert_eq!(write.is_revision, expected_version > 1);
            assert_eq!(write.version, expected_version);
            assert_eq!(write.status, SubmissionStatus::Pending);
            slot = Some(ExistingSlot {
                version: write.version,
                version_title: write.version_title,
            });
        }
    }

    #[test]
    fn blank_title_preserves_previous_on_revision() {
        let current = ExistingSlot {
            version: 2,
            version_title: Some("차분한 톤".to_string()),
        };
        let write = plan_submission(Some(&current), Some("   "));
        assert_eq!(write.version_title.as_deref(), Some("차분한 톤"));
    }

    #[test]
    fn new_title_replaces_previous_on_revision() {
        let current = ExistingSlot {
            version: 2,
            version_title: Some("차분한 톤".to_string()),
        };
        let write = plan_submission(Some(&current), Some("감성적 톤"));
        assert_eq!(write.version_title.as_deref(), Some("감성적 톤"));
    }

    // -- ReviewAction ------------------------------------------------------

    #[test]
    fn review_actions_map_to_statuses() {
        assert_eq!(
            ReviewAction::Approve.resulting_status(),
            SubmissionStatus::Approved
        );
        assert_eq!(
            ReviewAction::RequestRevision.resulting_status(),
            SubmissionStatus::Revised
        );
        assert_eq!(
            ReviewAction::Reject.resulting_status(),
            SubmissionStatus::Rejected
        );
    }

    // -- authorization -----------------------------------------------------

    fn access() -> (SubmissionAccess, Id, Id) {
        let submitter = Uuid::new_v4();
        let owner = Uuid::new_v4();
        (
            SubmissionAccess {
                submitter_id: submitter,
                project_owner_id: owner,
            },
            submitter,
            owner,
        )
    }

    #[test]
    fn submitter_may_update() {
        let (acc, submitter, _) = access();
        assert!(authorize_update(&acc, submitter, Role::Star).is_ok());
    }

    #[test]
    fn project_owner_may_update() {
        let (acc, _, owner) = access();
        assert!(authorize_update(&acc, owner, Role::Star).is_ok());
    }

    #[test]
    fn elevated_roles_may_update() {
        let (acc, _, _) = access();
        assert!(authorize_update(&acc, Uuid::new_v4(), Role::MoonFeedback).is_ok());
        assert!(authorize_update(&acc, Uuid::new_v4(), Role::Admin).is_ok());
    }

    #[test]
    fn unrelated_star_may_not_update() {
        let (acc, _, _) = access();
        assert!(authorize_update(&acc, Uuid::new_v4(), Role::Star).is_err());
    }

    #[test]
    fn deletion_is_submitter_or_admin_only() {
        let (acc, submitter, owner) = access();
        assert!(authorize_delete(&acc, submitter, Role::Star).is_ok());
        assert!(authorize_delete(&acc, Uuid::new_v4(), Role::Admin).is_ok());
        // Project owner and moon teams cannot delete someone else's work.
        assert!(authorize_delete(&acc, owner, Role::Star).is_err());
        assert!(authorize_delete(&acc, Uuid::new_v4(), Role::MoonFeedback).is_err());
    }
}
