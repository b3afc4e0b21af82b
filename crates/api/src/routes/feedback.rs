//! Routes mounted at `/feedback`.

use axum::routing::put;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(feedback::update))
        .route("/{id}/status", put(feedback::set_status))
}
