// ABOUTME: Binary entry point — parses CLI flags, loads config, starts the app.
// ABOUTME: Sends tracing output to a log file since the TUI owns the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use colloquy::app::App;
use colloquy::config::Config;

#[derive(Parser, Debug)]
#[command(name = "colloquy", about = "Terminal chat client for a hosted agents service")]
struct Cli {
    /// Base URL of the agents service (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Agent id to converse with (overrides the config file).
    #[arg(long)]
    agent: Option<String>,

    /// api-version query parameter to send with every request.
    #[arg(long)]
    api_version: Option<String>,

    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    if let Some(endpoint) = cli.endpoint {
        config.connection.endpoint = endpoint;
    }
    if let Some(agent) = cli.agent {
        config.agent.id = agent;
    }
    if let Some(api_version) = cli.api_version {
        config.connection.api_version = Some(api_version);
    }
    config.validate()?;

    init_tracing()?;
    tracing::info!(endpoint = %config.connection.endpoint, agent = %config.agent.id, "starting");

    App::new(config).run().await
}

/// Route tracing to a log file. Stderr is unusable while the alternate
/// screen is active.
fn init_tracing() -> Result<()> {
    let dir = Config::data_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data dir {}", dir.display()))?;
    let file = std::fs::File::create(Config::log_path())
        .with_context(|| format!("failed to open log file {}", Config::log_path().display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
