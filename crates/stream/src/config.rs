/// Streaming provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Provider API base URL.
    pub api_base: String,
    /// Provider account id.
    pub account_id: String,
    /// Bearer token for the provider API.
    pub api_token: String,
    /// Hostname serving manifests and thumbnails.
    pub delivery_domain: String,
    /// Secret for inbound webhook signature verification, when set.
    pub webhook_secret: Option<String>,
    /// Key id for signed playback tokens, when provisioned.
    pub signing_key_id: Option<String>,
    /// RSA private key PEM for signed playback tokens, when provisioned.
    pub signing_key_pem: Option<String>,
}

/// Default provider API base.
const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default delivery hostname.
const DEFAULT_DELIVERY_DOMAIN: &str = "videodelivery.net";

impl StreamConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default                 |
    /// |------------------------------|----------|-------------------------|
    /// | `CLOUDFLARE_ACCOUNT_ID`      | **yes**  | --                      |
    /// | `CLOUDFLARE_API_TOKEN`       | **yes**  | --                      |
    /// | `CLOUDFLARE_API_BASE`        | no       | provider v4 API         |
    /// | `CLOUDFLARE_DELIVERY_DOMAIN` | no       | `videodelivery.net`     |
    /// | `CLOUDFLARE_WEBHOOK_SECRET`  | no       | -- (verification off)   |
    /// | `CLOUDFLARE_SIGNING_KEY_ID`  | no       | -- (unsigned playback)  |
    /// | `CLOUDFLARE_SIGNING_KEY_PEM` | no       | -- (unsigned playback)  |
    ///
    /// # Panics
    ///
    /// Panics if the account id or API token is missing.
    pub fn from_env() -> Self {
        let account_id = std::env::var("CLOUDFLARE_ACCOUNT_ID")
            .expect("CLOUDFLARE_ACCOUNT_ID must be set in the environment");
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .expect("CLOUDFLARE_API_TOKEN must be set in the environment");

        Self {
            api_base: std::env::var("CLOUDFLARE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            account_id,
            api_token,
            delivery_domain: std::env::var("CLOUDFLARE_DELIVERY_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_DELIVERY_DOMAIN.into()),
            webhook_secret: std::env::var("CLOUDFLARE_WEBHOOK_SECRET").ok(),
            signing_key_id: std::env::var("CLOUDFLARE_SIGNING_KEY_ID").ok(),
            signing_key_pem: std::env::var("CLOUDFLARE_SIGNING_KEY_PEM").ok(),
        }
    }
}
