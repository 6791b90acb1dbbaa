use anyhow::Result;
use tracing_subscriber::EnvFilter;

use williamsburg_guide::{GuideConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GuideConfig::load()?;
    tracing::info!(
        "Starting guide for {} ({}, {})",
        config.location.name,
        config.location.latitude,
        config.location.longitude
    );

    web::run(config).await
}
