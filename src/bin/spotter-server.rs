// ABOUTME: Spotter server binary: loads configuration, migrates the database and serves HTTP
// ABOUTME: Command-line flags override the port and database URL from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Spotter Server
//!
//! ## Usage
//!
//! ```bash
//! # Defaults from the environment
//! cargo run --bin spotter-server
//!
//! # Override port and database
//! cargo run --bin spotter-server -- --port 9000 --database-url sqlite::memory:
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use spotter_server::config::environment::ServerConfig;
use spotter_server::database;
use spotter_server::logging;
use spotter_server::resources::ServerResources;
use spotter_server::routes;

#[derive(Parser)]
#[command(
    name = "spotter-server",
    about = "Spotter athlete discovery server",
    long_about = "Serve athlete registration, profiles and training-partner discovery over HTTP"
)]
struct Args {
    /// HTTP port override
    #[arg(long)]
    port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_logging(&config.logging).context("failed to initialize logging")?;
    info!(
        port = config.http_port,
        default_likes = config.default_remaining_likes,
        "Starting Spotter server"
    );

    let pool = database::connect(&config.database_url)
        .await
        .context("failed to open database")?;
    database::migrate(&pool)
        .await
        .context("failed to apply migrations")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let resources = Arc::new(ServerResources::new(pool, config));
    let app = routes::router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Spotter server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
