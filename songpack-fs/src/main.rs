//! songpack-fs - Gatekeeper File Server entry point
//!
//! Serves the song pack tree produced by gen-api behind Basic auth, with
//! CORS headers for the game client's origin.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use songpack_fs::{build_router, ServerArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    // Config first: the log level may come from the config file
    let config = ServerConfig::resolve(&args).context("Failed to load configuration")?;

    songpack_common::logging::init(&config.log_filter());

    info!(
        "Starting songpack file server (songpack-fs) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Serving {}", config.root().display());
    info!("CORS origin: {}", config.allowed_origin);

    if config.uses_default_credential {
        warn!("No credential configured, using the built-in default; set SONGPACK_CREDENTIAL");
    }

    let app = build_router(&config).context("Failed to build router")?;

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address()))?;

    info!("songpack-fs listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
