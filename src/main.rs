//! SmartFin main entry point

use anyhow::Context;
use clap::Parser;
use smartfin_api::{start_server, AppState};
use smartfin_config::Config;
use smartfin_parser::DefaultStatementParser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "smartfin")]
#[command(version)]
#[command(about = "Demo personal-finance backend serving a synthetic dataset", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(&args.config)
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
    config
        .apply_env()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.data.seed = Some(seed);
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.to_lowercase()),
    )
    .init();

    log::info!("Initializing SmartFin server...");
    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    // Build all process-wide state before serving
    let dataset = smartfin_core::load_dataset(&config.data).context("Failed to load dataset")?;
    let market = smartfin_core::load_market_provider()
        .await
        .context("Failed to load market data")?;

    let state = AppState::new(
        config,
        dataset,
        Arc::new(market),
        Arc::new(DefaultStatementParser),
    );

    start_server(state).await
}
