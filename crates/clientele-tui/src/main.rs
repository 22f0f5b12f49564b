//! Terminal customer-record manager.

use anyhow::Context;
use clap::Parser;
use clientele_api::HttpStore;
use clientele_config::{ClienteleConfig, DisplayTimezone, LayeredConfigOptions};
use clientele_tui::TuiConfig;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the TUI client.
#[derive(Parser)]
#[command(name = "clientele", version)]
struct Cli {
    /// Optional path to a clientele.json5 config file, applied over every other layer
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the REST API base URL
    #[arg(long, env = "CLIENTELE_BASE_URL")]
    base_url: Option<String>,
    /// Render timestamps in the local timezone instead of UTC
    #[arg(long)]
    local_time: bool,
}

/// Resolve layered config and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ClienteleConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    info!("loading layered config from cwd: {}", cwd.display());
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        info!("adding runtime config layer: {}", path.display());
        options = options.with_runtime_path(path);
    }
    let layered = ClienteleConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(base_url) = cli.base_url.as_ref() {
        config.api.base_url.clone_from(base_url);
    }
    if cli.local_time {
        config.display.timezone = DisplayTimezone::Local;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Entry point for the Clientele TUI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting TUI (config_set={}, base_url_set={}, local_time={})",
        cli.config.is_some(),
        cli.base_url.is_some(),
        cli.local_time
    );
    let config = load_config(&cli)?;
    info!(
        "using backend (base_url={}, timeout_secs={})",
        config.api.base_url, config.api.timeout_secs
    );

    let store = Arc::new(HttpStore::new(&config.api).context("failed to build http client")?);
    clientele_tui::run(
        store,
        TuiConfig {
            timezone: config.display.timezone,
        },
    )
    .await
}
