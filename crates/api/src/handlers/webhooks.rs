//! Inbound webhook endpoint for the streaming provider.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use bom_core::error::CoreError;
use bom_core::signing::verify_webhook_signature;
use bom_core::video::WebhookEvent;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::ingest;
use crate::state::AppState;

/// Header carrying the provider's delivery signature.
const SIGNATURE_HEADER: &str = "webhook-signature";

/// POST /api/v1/webhooks/stream
///
/// Signature verification runs against the raw body before any parsing;
/// a bad or stale signature is rejected with 401 and no effect. Events
/// for unknown media return 200 so the provider stops retrying.
pub async fn handle_stream_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if let Some(secret) = &state.config.stream.webhook_secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let now = chrono::Utc::now().timestamp();

        if !verify_webhook_signature(secret, signature, &body, now) {
            tracing::warn!("Webhook rejected: bad or stale signature");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid webhook signature".into(),
            )));
        }
    }

    let event = WebhookEvent::from_json(&body).map_err(AppError::Core)?;
    tracing::info!(uid = %event.uid, state = %event.status.state, "Stream webhook received");

    let outcome = ingest::apply_event(&state.pool, &state.urls, &event).await?;
    tracing::debug!(?outcome, "Webhook processed");

    Ok(Json(json!({ "received": true })))
}
