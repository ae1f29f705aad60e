//! # Scanport Server
//!
//! Binds the scan endpoint on the loopback interface and serves until
//! interrupted.

use anyhow::Context;
use clap::Parser;
use scanport_server::{
    AppState, create_app,
    infra::{
        config::{Config, ConfigOverrides},
        shutdown::shutdown_signal,
    },
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "scanport-server")]
#[command(about = "HTTP endpoint that drives a NAPS2 document scanner")]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Must run before parsing so clap's env fallbacks can see .env entries.
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let config = Config::resolve(cli.overrides)
        .context("failed to resolve configuration")?;
    config.ensure_directories()?;

    info!(path = %config.base_dir.display(), "base directory");
    info!(path = %config.scan_dir.display(), "scan directory");
    info!(path = %config.executable.display(), "scanner executable");
    if !config.executable_present() {
        warn!(
            path = %config.executable.display(),
            "scanner executable not found; scans will fail until it is installed"
        );
    }

    let (host, port) = (config.server.host.clone(), config.server.port);
    let router = create_app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!("Starting scanport server on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
