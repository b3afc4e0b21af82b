//! Webhook-driven video lifecycle reconciliation.
//!
//! Consumes verified provider events and applies the terminal-state
//! mapping to the catalog: `ready` finalizes the video, `error` fails
//! it, everything else is logged and dropped. Applying a state is a
//! plain assignment, so duplicate or out-of-order deliveries converge
//! — the latest terminal state wins and repeats are no-ops.

use bom_core::video::{StreamState, VideoStatus, WebhookEvent};
use bom_db::repositories::{TechnicalSpecRepo, VideoRepo};
use bom_db::DbPool;
use bom_stream::DeliveryUrls;

/// What one event application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A terminal status was assigned to the video.
    Applied(VideoStatus),
    /// The reported state is informational; no write happened.
    NonTerminal,
    /// No catalog row owns this uid; the event was dropped.
    UnknownMedia,
}

/// Apply one verified webhook event to the catalog.
///
/// Never surfaces an error to the delivery for events about unknown or
/// stale media — the provider would retry forever; we log and drop.
pub async fn apply_event(
    pool: &DbPool,
    urls: &DeliveryUrls,
    event: &WebhookEvent,
) -> Result<ReconcileOutcome, sqlx::Error> {
    let Some(state) = event.stream_state() else {
        tracing::info!(uid = %event.uid, state = %event.status.state, "Unrecognized stream state, ignoring");
        return Ok(ReconcileOutcome::NonTerminal);
    };

    let Some(terminal) = state.terminal_status() else {
        tracing::debug!(uid = %event.uid, state = %state, "Intermediate stream state, no transition");
        return Ok(ReconcileOutcome::NonTerminal);
    };

    let Some(spec) = TechnicalSpecRepo::find_by_stream_uid(pool, &event.uid).await? else {
        tracing::warn!(uid = %event.uid, "Webhook for unknown media, dropping");
        return Ok(ReconcileOutcome::UnknownMedia);
    };

    VideoRepo::set_terminal_status(pool, spec.video_id, terminal).await?;
    tracing::info!(uid = %event.uid, video_id = %spec.video_id, status = %terminal, "Video status reconciled");

    if state == StreamState::Ready {
        if let Some(duration) = event.duration {
            TechnicalSpecRepo::set_duration(pool, spec.video_id, duration).await?;
        }
        // Provider thumbnails become available with readiness; backfill
        // only where nothing is set.
        if spec.thumbnail_url.is_none() {
            let thumbnail = urls.thumbnail(&event.uid);
            TechnicalSpecRepo::backfill_thumbnail(pool, spec.video_id, &thumbnail).await?;
        }
    }

    Ok(ReconcileOutcome::Applied(terminal))
}
