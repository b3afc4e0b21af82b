//! Routes mounted at `/webhooks`.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stream", post(webhooks::handle_stream_webhook))
}
