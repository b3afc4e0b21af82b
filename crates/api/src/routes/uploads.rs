//! Routes mounted at `/uploads`.

use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/sessions", post(uploads::create_session))
}
