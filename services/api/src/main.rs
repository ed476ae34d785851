use std::sync::Arc;

use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use raisedup_api::config::ApiConfig;
use raisedup_api::infra::stripe::StripeClient;
use raisedup_api::router::build_router;
use raisedup_api::state::AppState;
use raisedup_auth_types::bearer::JwtSecret;
use raisedup_core::config::Config;
use raisedup_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ApiConfig::try_from_env().context("failed to load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let stripe = config
        .stripe_key()
        .map(|key| StripeClient::new(key, &config.stripe_api_base));
    if stripe.is_none() {
        tracing::warn!("STRIPE_SECRET_KEY not set; payment endpoints will return 400");
    }

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        stripe,
        client_url: Arc::from(config.client_url.as_str()),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("api listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
