mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use xcom_containment_core::{
    config::{self, AppConfig},
    Scenario,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config::config_path();
    let config = AppConfig::load_from(&config_path)?;
    init_logging(&config)?;
    config::ensure_default_config_at(&config_path)?;
    info!(path = %config_path.display(), "configuration loaded");

    let scenario_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.scenario_path.clone());
    let scenario = Scenario::load_or_sample(scenario_path.as_deref())?;

    let mut app = app::ContainmentApp::new(scenario, config);
    app.run().await
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("containment.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;

    // stdout belongs to the terminal UI.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
