use std::sync::Arc;

use bom_core::signing::PlaybackSigner;
use bom_stream::{DeliveryUrls, StreamClient};

use crate::config::ServerConfig;
use crate::ingest::IngestionCoordinator;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Streaming provider client.
    pub stream: Arc<StreamClient>,
    /// Playback token signer (no-op when keys are not provisioned).
    pub signer: Arc<PlaybackSigner>,
    /// Delivery URL templates.
    pub urls: DeliveryUrls,
    /// Upload-session orchestration.
    pub coordinator: Arc<IngestionCoordinator>,
}

impl AppState {
    /// Wire up the shared state from configuration.
    pub fn new(pool: bom_db::DbPool, config: ServerConfig) -> Self {
        let stream = Arc::new(StreamClient::new(&config.stream));
        let signer = Arc::new(PlaybackSigner::new(
            config.stream.signing_key_id.clone(),
            config.stream.signing_key_pem.clone(),
        ));
        let urls = DeliveryUrls::new(config.stream.delivery_domain.clone());
        let coordinator = Arc::new(IngestionCoordinator::new(Arc::clone(&stream)));

        Self {
            pool,
            config: Arc::new(config),
            stream,
            signer,
            urls,
            coordinator,
        }
    }
}
