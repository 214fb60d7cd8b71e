// mathops - Math operations API with an LLM-backed chat endpoint
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use mathops::chat::ChatForwarder;
use mathops::cli::Args;
use mathops::config::AppConfig;
use mathops::server::create_router;
use mathops::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_args(&args);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting mathops v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the runtime sized by configuration
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 4: Chat forwarder, gated on the provider credential
    let forwarder = ChatForwarder::from_config(&config)?;
    if forwarder.is_enabled() {
        info!(
            "Chat enabled via {} at {}",
            config.provider.name, config.provider.api_url
        );
    } else {
        warn!("No provider credential configured; /chat is disabled");
    }

    // Phase 5: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, forwarder)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
