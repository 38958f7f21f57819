//! Company Lookup - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the company lookup API.

use company_lookup::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_lookup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials stop the process before the listener is bound
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={} base={}",
        config.default_model, config.api_base
    );

    api::serve(config).await?;

    Ok(())
}
