//! rodb HTTP API server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rodb::server::{AppState, Config, init_logging, router};

/// rodb HTTP API server.
#[derive(Parser, Debug)]
#[command(name = "rodb-server")]
#[command(about = "HTTP API server for the in-memory game database")]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "rodb.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)?;
    init_logging(&config.logging)?;

    tracing::info!(config = %args.config.display(), "loading catalog");

    // Build the snapshot and restore popularity state
    let state = AppState::from_config(&config)?;

    // Build router
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Parse bind address
    let addr: SocketAddr = config.bind_addr().parse()?;

    tracing::info!("starting server on {}", addr);

    // Create the listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
