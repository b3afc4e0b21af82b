use bom_stream::StreamConfig;
use bom_worker::config::{StorageConfig, SyncConfig};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Access-token validation configuration (secret shared with the
    /// marketplace identity service).
    pub jwt: JwtConfig,
    /// Streaming provider configuration.
    pub stream: StreamConfig,
    /// Blob-storage settings; absent when R2 credentials are not
    /// provisioned (the on-demand sync endpoint then reports 503).
    pub storage: Option<StorageConfig>,
    /// Sync-job settings; absent without a configured system owner.
    pub sync_job: Option<SyncConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage = std::env::var("CLOUDFLARE_R2_ACCESS_KEY_ID")
            .is_ok()
            .then(StorageConfig::from_env);
        let sync_job = std::env::var("SYNC_OWNER_ID").is_ok().then(SyncConfig::from_env);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            stream: StreamConfig::from_env(),
            storage,
            sync_job,
        }
    }
}
