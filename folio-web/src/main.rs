//! folio-web - portfolio content service
//!
//! Serves the project catalog, project media galleries and the static site.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_common::config::{ConfigFile, ConfigOverrides};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_web::{build_router, AppState};

/// Command-line arguments for folio-web
#[derive(Parser, Debug)]
#[command(name = "folio-web")]
#[command(about = "Portfolio content service")]
#[command(version)]
struct Args {
    /// Config file (default: $FOLIO_CONFIG, ./folio.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    bind: Option<String>,

    /// Static site directory
    #[arg(long, env = "FOLIO_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,

    /// Directory scanned for project images
    #[arg(long, env = "FOLIO_MEDIA_DIR")]
    media_dir: Option<PathBuf>,

    /// Catalog file replacing the built-in project list
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            public_dir: self.public_dir.clone(),
            media_dir: self.media_dir.clone(),
            catalog_path: self.catalog.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the file can set the log level
    let config_file = ConfigFile::locate_and_load(args.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=info", config_file.toml.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting folio-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = config_file.resolve(args.overrides());
    info!("Public directory: {}", config.public_dir.display());
    info!("Media directory: {}", config.media_dir.display());
    if !config.media_dir.is_dir() {
        warn!(
            "Media directory {} does not exist; galleries will use catalog fallbacks",
            config.media_dir.display()
        );
    }

    let state = AppState::from_config(&config).context("Failed to load project catalog")?;
    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("folio-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
