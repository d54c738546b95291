// src/main.rs - hearth-host daemon entry point
use std::path::PathBuf;

use clap::Parser;

use hearth_rs::config::HubConfig;
use hearth_rs::hub::Hub;

#[derive(Debug, Parser)]
#[command(name = "hearth-host", version, about = "Thermostat hub daemon")]
struct Args {
    /// Path to the hub configuration file.
    #[arg(short, long, default_value = "hub.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    tracing::info!("Starting hearth thermostat hub");

    let config = HubConfig::load(&args.config).map_err(|e| {
        tracing::error!("Failed to load config from '{}': {}", args.config.display(), e);
        e
    })?;

    let mut hub = Hub::new(config).await.map_err(|e| {
        tracing::error!("Failed to initialize hub: {}", e);
        e
    })?;

    hub.start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    hub.shutdown().await;
    tracing::info!("Hub stopped");

    Ok(())
}
