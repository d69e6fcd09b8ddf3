use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};

mod api;
mod config;
mod error;
mod football;
mod live_matches;
mod match_detail;
#[cfg(test)]
mod testing;

use api::AppState;
use config::Config;
use football::{ApiFootballClient, FootballApiHandle};
use live_matches::{LiveMatchCache, RefresherHandle};
use match_detail::MatchDetailAggregator;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let upstream: FootballApiHandle = Arc::new(ApiFootballClient::new(
        &config.api_base_url,
        &config.api_host,
        &config.api_key,
        config.upstream_timeout(),
    )?);
    info!(
        "Upstream: {} (timeout {:?})",
        config.api_base_url,
        config.upstream_timeout()
    );

    let live_matches = LiveMatchCache::new(Arc::clone(&upstream));
    let refresher = RefresherHandle::spawn(live_matches.clone(), config.refresh_interval());

    let app = api::router(AppState {
        live_matches,
        match_detail: MatchDetailAggregator::new(upstream),
    });
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    // Run server (blocks until shutdown)
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
