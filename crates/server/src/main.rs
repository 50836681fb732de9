//! Movies API server binary.
//!
//! Loads the seed dataset, then serves the REST API until Ctrl-C.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use data_loader::MovieStore;
use schema::MovieSchema;
use server::{OriginPolicy, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,data_loader=debug")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting movies API with {:?}", config);

    let store = MovieStore::load_from_file(&config.seed).with_context(|| {
        format!("Failed to load seed dataset from {}", config.seed.display())
    })?;

    let schema = MovieSchema::default();
    info!(
        "Accepting release years {}..={}",
        schema.min_year, schema.max_year
    );

    let app = server::app(
        store,
        schema,
        OriginPolicy::new(&config.allowed_origins),
    );

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
