//! Routes mounted at `/videos`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/playback", get(videos::get_playback))
        .route("/sync", post(videos::run_storage_sync))
}
