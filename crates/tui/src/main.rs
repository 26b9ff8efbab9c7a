mod app;
mod form;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use campus_hub_core::{
    api::mock_backend,
    config::{self, AppConfig},
    SystemClock,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config::ensure_default_config()?;
    let config = AppConfig::load_from(&config_path)?;
    init_logging(&config.log_dir)?;
    tracing::info!(path = %config_path.display(), latency_ms = config.latency_ms, "Starting campus-hub");

    let (resources, rides) = mock_backend(&config, SystemClock);

    let mut app = app::CampusHubApp::new(Arc::new(resources), Arc::new(rides), Arc::new(SystemClock));
    app.run().await
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("campus-hub.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal owns stdout, so everything goes to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
