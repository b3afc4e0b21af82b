//! Synchronized dual-player review session.
//!
//! The review screen plays the current submission (player A) next to a
//! comparison version (player B) against one shared transport clock. The
//! browser owns the actual media elements; this model owns the decisions:
//! when to correct B's drift, how to clamp seeks, which feedback entries
//! a filter shows, and when keyboard shortcuts apply. Corrections are
//! computed only inside progress callbacks — there is no timer racing a
//! seek, the model only ever reads positions the media pipeline already
//! reported.

use crate::annotation::ShapeKind;
use crate::feedback::{ComparedSide, FeedbackPriority, FeedbackStatus};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Drift beyond which B is snapped back to A's position, in seconds.
/// Correcting smaller drift causes constant micro-seeks and stutter.
pub const DRIFT_THRESHOLD_SECS: f64 = 0.5;

// ---------------------------------------------------------------------------
// Player commands
// ---------------------------------------------------------------------------

/// Instructions for the embedding UI to apply to the media elements after
/// a transport operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportUpdate {
    /// Seek player A to this position.
    pub seek_a: Option<f64>,
    /// Seek player B to this position.
    pub seek_b: Option<f64>,
    /// Mirror this play/pause state onto player B.
    pub set_b_playing: Option<bool>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Transport state for one review session.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// Shared clock, driven by player A's progress callbacks.
    current_time: f64,
    /// Duration of the master (player A) in seconds.
    duration: f64,
    /// Last reported position of player B.
    b_position: f64,
    playing: bool,
    sync_enabled: bool,
}

impl ReviewSession {
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration: duration.max(0.0),
            b_position: 0.0,
            playing: false,
            sync_enabled: false,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }

    /// Last known position of the comparison player.
    pub fn comparison_position(&self) -> f64 {
        self.b_position
    }

    /// Enable or disable comparison sync. Enabling immediately aligns B.
    pub fn set_sync(&mut self, enabled: bool) -> TransportUpdate {
        self.sync_enabled = enabled;
        if enabled {
            self.b_position = self.current_time;
            TransportUpdate {
                seek_b: Some(self.current_time),
                set_b_playing: Some(self.playing),
                ..Default::default()
            }
        } else {
            TransportUpdate::default()
        }
    }

    /// Seek the shared clock. The target is clamped to `[0, duration]`
    /// and applied to both players.
    pub fn seek_to(&mut self, target: f64) -> TransportUpdate {
        let clamped = if target.is_finite() {
            target.clamp(0.0, self.duration)
        } else {
            0.0
        };
        self.current_time = clamped;
        self.b_position = clamped;
        TransportUpdate {
            seek_a: Some(clamped),
            seek_b: Some(clamped),
            ..Default::default()
        }
    }

    /// Start playback. B mirrors A while sync is on.
    pub fn play(&mut self) -> TransportUpdate {
        self.playing = true;
        TransportUpdate {
            set_b_playing: self.sync_enabled.then_some(true),
            ..Default::default()
        }
    }

    /// Pause playback. B mirrors A while sync is on.
    pub fn pause(&mut self) -> TransportUpdate {
        self.playing = false;
        TransportUpdate {
            set_b_playing: self.sync_enabled.then_some(false),
            ..Default::default()
        }
    }

    /// Progress callback from the media pipeline with both players'
    /// reported positions. Advances the shared clock and, when sync is on
    /// and B has drifted past [`DRIFT_THRESHOLD_SECS`], returns a
    /// correcting seek for B. Drift within the threshold is left alone.
    pub fn on_progress(&mut self, a_position: f64, b_position: f64) -> Option<f64> {
        self.current_time = a_position;
        self.b_position = b_position;

        if !self.sync_enabled {
            return None;
        }
        if (a_position - b_position).abs() > DRIFT_THRESHOLD_SECS {
            self.b_position = a_position;
            Some(a_position)
        } else {
            None
        }
    }

    /// Jump both players to a feedback entry's anchor.
    pub fn jump_to_feedback(&mut self, start_time: f64) -> TransportUpdate {
        self.seek_to(start_time)
    }

    /// Begin a feedback draft anchored at the current clock position.
    pub fn anchor_feedback(&self) -> f64 {
        self.current_time
    }
}

// ---------------------------------------------------------------------------
// Keyboard shortcuts
// ---------------------------------------------------------------------------

/// Whether a transport keyboard shortcut should fire.
///
/// Space/arrow keys must keep their typing meaning while the reviewer is
/// writing in an input or textarea.
pub fn shortcuts_enabled(focus_in_text_input: bool) -> bool {
    !focus_in_text_input
}

// ---------------------------------------------------------------------------
// Feedback filtering
// ---------------------------------------------------------------------------

/// The fields of a feedback entry the list filter looks at.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackEntry {
    pub status: FeedbackStatus,
    pub priority: FeedbackPriority,
    pub side: ComparedSide,
    pub shape: Option<ShapeKind>,
}

/// Composable feedback list filter. `None` fields match everything;
/// set fields must all match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackFilter {
    pub status: Option<FeedbackStatus>,
    pub priority: Option<FeedbackPriority>,
    pub side: Option<ComparedSide>,
    pub shape: Option<ShapeKind>,
}

impl FeedbackFilter {
    pub fn matches(&self, entry: &FeedbackEntry) -> bool {
        self.status.is_none_or(|s| s == entry.status)
            && self.priority.is_none_or(|p| p == entry.priority)
            && self.side.is_none_or(|v| v == entry.side)
            && self.shape.is_none_or(|s| entry.shape == Some(s))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ReviewSession {
        ReviewSession::new(596.0)
    }

    // -- seeking -----------------------------------------------------------

    #[test]
    fn seek_applies_to_both_players() {
        let mut s = session();
        let update = s.seek_to(120.0);
        assert_eq!(update.seek_a, Some(120.0));
        assert_eq!(update.seek_b, Some(120.0));
        assert_eq!(s.current_time(), 120.0);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut s = session();
        assert_eq!(s.seek_to(10_000.0).seek_a, Some(596.0));
        assert_eq!(s.seek_to(-5.0).seek_a, Some(0.0));
        assert_eq!(s.seek_to(f64::NAN).seek_a, Some(0.0));
    }

    // -- drift correction --------------------------------------------------

    #[test]
    fn small_drift_is_left_alone() {
        let mut s = session();
        s.set_sync(true);
        assert_eq!(s.on_progress(100.0, 100.3), None);
        assert_eq!(s.on_progress(100.0, 99.6), None);
    }

    #[test]
    fn large_drift_snaps_b_to_a() {
        let mut s = session();
        s.set_sync(true);
        assert_eq!(s.on_progress(100.0, 98.0), Some(100.0));
        assert_eq!(s.comparison_position(), 100.0);
        // B was corrected; the next aligned report needs no further seek.
        assert_eq!(s.on_progress(100.2, 100.2), None);
    }

    #[test]
    fn drift_exactly_at_threshold_is_tolerated() {
        let mut s = session();
        s.set_sync(true);
        assert_eq!(s.on_progress(100.0, 100.0 - DRIFT_THRESHOLD_SECS), None);
    }

    #[test]
    fn no_correction_while_sync_disabled() {
        let mut s = session();
        assert_eq!(s.on_progress(100.0, 50.0), None);
    }

    #[test]
    fn progress_advances_shared_clock() {
        let mut s = session();
        s.on_progress(42.5, 42.5);
        assert_eq!(s.current_time(), 42.5);
        assert_eq!(s.anchor_feedback(), 42.5);
    }

    // -- play/pause mirroring ----------------------------------------------

    #[test]
    fn play_pause_mirrors_only_in_sync_mode() {
        let mut s = session();
        assert_eq!(s.play().set_b_playing, None);
        s.set_sync(true);
        assert_eq!(s.play().set_b_playing, Some(true));
        assert_eq!(s.pause().set_b_playing, Some(false));
        assert!(!s.is_playing());
    }

    #[test]
    fn enabling_sync_aligns_b_immediately() {
        let mut s = session();
        s.seek_to(30.0);
        s.play();
        let update = s.set_sync(true);
        assert_eq!(update.seek_b, Some(30.0));
        assert_eq!(update.set_b_playing, Some(true));
    }

    // -- feedback interaction ----------------------------------------------

    #[test]
    fn selecting_feedback_seeks_both_players() {
        let mut s = session();
        let update = s.jump_to_feedback(32.0);
        assert_eq!(update.seek_a, Some(32.0));
        assert_eq!(update.seek_b, Some(32.0));
    }

    // -- shortcuts ---------------------------------------------------------

    #[test]
    fn shortcuts_suppressed_while_typing() {
        assert!(shortcuts_enabled(false));
        assert!(!shortcuts_enabled(true));
    }

    // -- filtering ---------------------------------------------------------

    fn entry(status: FeedbackStatus, side: ComparedSide) -> FeedbackEntry {
        FeedbackEntry {
            status,
            priority: FeedbackPriority::Normal,
            side,
            shape: Some(ShapeKind::Rect),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = FeedbackFilter::default();
        assert!(filter.matches(&entry(FeedbackStatus::Pending, ComparedSide::A)));
        assert!(filter.matches(&entry(FeedbackStatus::Resolved, ComparedSide::B)));
    }

    #[test]
    fn filters_compose_conjunctively() {
        let filter = FeedbackFilter {
            status: Some(FeedbackStatus::Pending),
            side: Some(ComparedSide::B),
            ..Default::default()
        };
        assert!(filter.matches(&entry(FeedbackStatus::Pending, ComparedSide::B)));
        assert!(!filter.matches(&entry(FeedbackStatus::Pending, ComparedSide::A)));
        assert!(!filter.matches(&entry(FeedbackStatus::Resolved, ComparedSide::B)));
    }

    #[test]
    fn shape_filter_requires_an_annotation() {
        let filter = FeedbackFilter {
            shape: Some(ShapeKind::Arrow),
            ..Default::default()
        };
        let mut e = entry(FeedbackStatus::Pending, ComparedSide::A);
        assert!(!filter.matches(&e));
        e.shape = Some(ShapeKind::Arrow);
        assert!(filter.matches(&e));
        e.shape = None;
        assert!(!filter.matches(&e));
    }
}
