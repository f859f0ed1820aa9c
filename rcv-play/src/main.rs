//! rcv-play - remote receiver driving an external media player
//!
//! Numbered play requests start the matching file from the media directory in
//! the configured player; power stops it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rcv_common::config::{self, Overrides, CONFIG_ENV_VAR};
use rcv_common::shutdown::shutdown_signal;
use rcv_play::catalog::CatalogConfig;
use rcv_play::session::PlayerConfig;
use rcv_play::{build_router, AppState, SessionManager};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for rcv-play
#[derive(Parser, Debug)]
#[command(name = "rcv-play")]
#[command(about = "Plays media files selected on the remote control")]
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

    /// Directory containing media files
    #[arg(short, long, env = "RCV_MEDIA_DIR")]
    media_dir: Option<PathBuf>,

    /// Player executable
    #[arg(long, env = "RCV_PLAYER")]
    player: Option<String>,

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
        media_directory: args.media_dir,
        player_command: args.player,
        log_level: args.log_level,
    });

    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rcv_play={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting remote receiver (rcv-play) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", source);

    let media_directory = config.media_directory();
    info!("Media directory: {}", media_directory.display());
    if !media_directory.is_dir() {
        // Catalog is rebuilt per request; play reports the error
        warn!(
            "Media directory {} is not readable yet",
            media_directory.display()
        );
    }
    info!(
        "Player: {} {:?} (stop grace {:?})",
        config.player.command,
        config.player.args,
        config.stop_grace()
    );

    let catalog = CatalogConfig::new(media_directory, &config.extensions());
    let player = PlayerConfig {
        command: config.player.command.clone(),
        args: config.player.args.clone(),
        stop_grace: config.stop_grace(),
    };
    let session = Arc::new(SessionManager::with_external_player(catalog, player));

    let listener = rcv_common::api::bind_listener(&config.bind_addr())
        .await
        .context("Failed to bind listener")?;

    axum::serve(listener, build_router(AppState::new(Arc::clone(&session))))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    session.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
