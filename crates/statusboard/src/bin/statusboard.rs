//! Statusboard - Minecraft status responder
//!
//! Command-line entry point.

use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};

use statusboard::{ConfigOverrides, ServerStatus, StatusBoardConfig, StatusServer, telemetry};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<Level>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_subscriber(args.log_level);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = StatusBoardConfig::try_load(args.config.as_deref())
        .context("Failed to load configuration")?;
    config.merge(args.overrides);

    let addr = config.bind_addr()?;
    let status = ServerStatus::from_config(&config).context("Failed to build status response")?;

    info!("Starting statusboard...");
    let server = StatusServer::bind(addr, status)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
