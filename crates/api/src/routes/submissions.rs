//! Routes mounted at `/submissions`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{feedback, submissions};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(submissions::list).post(submissions::submit))
        .route(
            "/{id}",
            get(submissions::get_by_id)
                .put(submissions::update)
                .delete(submissions::remove),
        )
        .route("/{id}/review", post(submissions::review))
        .route("/{id}/captions", post(submissions::generate_captions))
        .route("/{id}/captions/{lang}", put(submissions::upload_captions))
        .route(
            "/{id}/feedback",
            get(feedback::list_for_submission).post(feedback::create),
        )
}
