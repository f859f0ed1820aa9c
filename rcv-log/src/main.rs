//! rcv-log - logging-only remote receiver
//!
//! Logs each button press posted by the remote and acknowledges it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rcv_common::config::{self, Overrides, CONFIG_ENV_VAR};
use rcv_common::shutdown::shutdown_signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for rcv-log
#[derive(Parser, Debug)]
#[command(name = "rcv-log")]
#[command(about = "Logs button presses from the remote control")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "RCV_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RCV_PORT")]
    port: Option<u16>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "RCV_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;
    let config = config.apply(Overrides {
        host: args.host,
        port: args.port,
        log_level: args.log_level,
        ..Default::default()
    });

    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rcv_log={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting remote receiver (rcv-log) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", source);

    let listener = rcv_common::api::bind_listener(&config.bind_addr())
        .await
        .context("Failed to bind listener")?;

    axum::serve(listener, rcv_log::build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
