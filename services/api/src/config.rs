use serde::Deserialize;

use raisedup_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HS256 secret the identity provider signs access tokens with.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 5000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Front-end origin used to build checkout redirect URLs.
    #[serde(default = "default_client_url")]
    pub client_url: String,
    /// Payment provider secret key. Absent or empty disables payments.
    #[serde(default)]
    pub stripe_secret_key: Option<String>,
    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,
}

fn default_api_port() -> u16 {
    5000
}

fn default_client_url() -> String {
    "http://localhost:5173".to_owned()
}

fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_owned()
}

impl Config for ApiConfig {}

impl ApiConfig {
    /// The provider key, if payments are configured.
    pub fn stripe_key(&self) -> Option<&str> {
        self.stripe_secret_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
