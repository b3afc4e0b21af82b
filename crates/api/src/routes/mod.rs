//! Route definitions.

pub mod feedback;
pub mod health;
pub mod submissions;
pub mod uploads;
pub mod videos;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /uploads/sessions                       create upload session (POST)
///
/// /webhooks/stream                        provider webhook consumer (POST)
///
/// /videos/{id}/playback                   playback payload (GET)
/// /videos/sync                            on-demand storage sync (POST, staff)
///
/// /submissions                            list (GET), submit/revise (POST)
/// /submissions/{id}                       get, update, delete
/// /submissions/{id}/review                reviewer decision (POST)
/// /submissions/{id}/captions              caption generation (POST)
/// /submissions/{id}/captions/{lang}       caption track upload (PUT)
/// /submissions/{id}/feedback              list (GET), create (POST)
///
/// /feedback/{id}                          author edit (PUT)
/// /feedback/{id}/status                   resolution transition (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/uploads", uploads::router())
        .nest("/webhooks", webhooks::router())
        .nest("/videos", videos::router())
        .nest("/submissions", submissions::router())
        .nest("/feedback", feedback::router())
}
